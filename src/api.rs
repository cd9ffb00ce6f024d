use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use crate::model::{MealPeriod, MenuItem, ProcessedMenu};
use crate::parse::ParseOptions;
use crate::pipeline::process_all;
use crate::pipeline::process_document;
use crate::store::MenuStore;

pub type MenuIndex = Arc<RwLock<HashMap<String, ProcessedMenu>>>;

#[derive(Clone)]
pub struct AppState {
    pub index: MenuIndex,
    pub options: ParseOptions,
}

impl AppState {
    pub fn new(menus: HashMap<String, ProcessedMenu>, options: ParseOptions) -> Self {
        Self {
            index: Arc::new(RwLock::new(menus)),
            options,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub id: String,
    pub period: Option<MealPeriod>,
    pub items: Vec<MenuItem>,
    pub defects: Vec<String>,
    pub processed_at: DateTime<Utc>,
}

impl MenuResponse {
    fn from_menu(menu: &ProcessedMenu, period: Option<MealPeriod>) -> Self {
        let items = menu
            .items
            .iter()
            .filter(|item| period.is_none_or(|p| item.meal == p))
            .cloned()
            .collect();
        Self {
            id: menu.id.clone(),
            period,
            items,
            defects: menu.defects.clone(),
            processed_at: menu.processed_at,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/menus", get(list_menus))
        .route("/menus/{id}", get(get_menu).post(submit_menu))
        .route("/menus/{id}/formatted", get(get_formatted))
        .route("/menus/{id}/clean", get(get_clean))
        .layer(Extension(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
}

/// Process every extracted text already in the store.
pub fn build_index(
    store: &MenuStore,
    options: ParseOptions,
) -> anyhow::Result<HashMap<String, ProcessedMenu>> {
    let mut docs = Vec::new();
    for name in store.dirty_names()? {
        let raw = store.read_dirty(&name)?;
        docs.push((name, raw));
    }
    let menus = process_all(&docs, options);
    tracing::info!(count = menus.len(), "built menu index");
    Ok(menus.into_iter().map(|m| (m.id.clone(), m)).collect())
}

fn not_found(id: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("Menu not found: {id}")).into_response()
}

pub async fn list_menus(Extension(state): Extension<AppState>) -> Json<Vec<String>> {
    let index = state.index.read().await;
    let mut ids: Vec<String> = index.keys().cloned().collect();
    ids.sort();
    Json(ids)
}

pub async fn get_menu(
    Path(id): Path<String>,
    Query(params): Query<MenuQuery>,
    Extension(state): Extension<AppState>,
) -> Response {
    let period = match params.period.as_deref().map(str::parse::<MealPeriod>) {
        None => None,
        Some(Ok(period)) => Some(period),
        Some(Err(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                "Invalid period. Use breakfast, lunch or dinner.",
            )
                .into_response();
        }
    };

    let index = state.index.read().await;
    match index.get(&id) {
        Some(menu) => Json(MenuResponse::from_menu(menu, period)).into_response(),
        None => not_found(&id),
    }
}

pub async fn get_formatted(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Response {
    let index = state.index.read().await;
    match index.get(&id) {
        Some(menu) => menu.formatted.clone().into_response(),
        None => not_found(&id),
    }
}

pub async fn get_clean(Path(id): Path<String>, Extension(state): Extension<AppState>) -> Response {
    let index = state.index.read().await;
    match index.get(&id) {
        Some(menu) => menu.clean_text.clone().into_response(),
        None => not_found(&id),
    }
}

/// Accepts raw extracted text for a document and replaces any earlier
/// version of it.
pub async fn submit_menu(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
    body: String,
) -> Response {
    let menu = process_document(&id, &body, state.options);
    let response = MenuResponse::from_menu(&menu, None);
    state.index.write().await.insert(id, menu);
    (StatusCode::CREATED, Json(response)).into_response()
}
