pub mod secured;

use crate::server::AppState;
use axum::{response::IntoResponse, routing::get, Json, Router};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub fn get_router(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let prefix = state.config.api_prefix.trim_matches('/');

    let router = Router::new();
    let router = if prefix.is_empty() {
        router.merge(secured::get_router(state))
    } else {
        router.nest(&format!("/{prefix}"), secured::get_router(state))
    };

    router
        .route("/", get(get_root))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
}

pub async fn get_root() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
