use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::metrics;
use crate::services::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut status = "healthy";
    let mut dependencies = serde_json::Map::new();

    dependencies.insert(
        "riddle_cache".to_string(),
        json!({
            "status": "healthy",
            "entries": state.riddle_cache.len()
        }),
    );

    // Missing credentials only degrade: riddle fetches fail open
    let upstream = &state.config.upstream;
    let upstream_status = if upstream.is_configured() {
        "configured"
    } else {
        status = "degraded";
        "unconfigured"
    };
    dependencies.insert(
        "upstream".to_string(),
        json!({
            "status": upstream_status,
            "url": upstream.api_url
        }),
    );

    (
        StatusCode::OK,
        Json(json!({
            "status": status,
            "service": "riddles-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": dependencies
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

pub mod riddles;
pub mod stats;
