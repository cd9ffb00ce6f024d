//! Turns the text of restaurant menu PDFs into structured menu items and
//! formatted lunch/dinner listings.
//!
//! Raw text flows through the cleaning passes ([`filter`], [`headers`],
//! [`segment`]), then [`parse`] and [`format`]. [`pipeline`] strings them
//! together; the remaining modules fetch, store and publish documents.

pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod format;
pub mod headers;
pub mod logging;
pub mod model;
pub mod notify;
pub mod parse;
pub mod pipeline;
pub mod run;
pub mod segment;
pub mod source;
pub mod store;

pub use config::Settings;
pub use document::Document;
pub use error::{MenuError, Result};
pub use format::format_menu;
pub use model::{MealPeriod, MenuItem, ParsedMenu, ProcessedMenu};
pub use parse::{ParseOptions, parse_items};
pub use pipeline::{clean_text, process_all, process_document};
