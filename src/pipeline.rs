use chrono::Utc;
use rayon::prelude::*;

use crate::document::Document;
use crate::filter::filter_lines;
use crate::format::format_menu;
use crate::headers::normalize_headers;
use crate::model::ProcessedMenu;
use crate::parse::{ParseOptions, parse_items};
use crate::segment::segment_items;

/// Cleaning stage: raw extracted text in, one blank-line-delimited block per
/// menu item out.
pub fn clean_document(doc: Document) -> Document {
    let before = doc.len();
    let doc = filter_lines(doc);
    tracing::debug!(before, after = doc.len(), "filtered lines");
    let doc = normalize_headers(doc);
    let doc = segment_items(doc);
    tracing::debug!(lines = doc.len(), "segmented items");
    doc
}

pub fn clean_text(raw: &str) -> String {
    clean_document(Document::from_text(raw)).to_text()
}

/// Run the whole pipeline over one document's extracted text.
pub fn process_document(id: &str, raw: &str, options: ParseOptions) -> ProcessedMenu {
    let clean_text = clean_text(raw);
    let parsed = parse_items(&clean_text, options);
    let formatted = format_menu(&parsed.items);
    tracing::info!(
        id,
        items = parsed.items.len(),
        defects = parsed.defects.len(),
        "processed menu"
    );

    ProcessedMenu {
        id: id.to_string(),
        items: parsed.items,
        defects: parsed.defects.iter().map(|e| e.to_string()).collect(),
        clean_text,
        formatted,
        processed_at: Utc::now(),
    }
}

/// Documents share no state, so they are processed in parallel. Output order
/// follows input order.
pub fn process_all(docs: &[(String, String)], options: ParseOptions) -> Vec<ProcessedMenu> {
    docs.par_iter()
        .map(|(id, raw)| process_document(id, raw, options))
        .collect()
}
