//! Health check handler.

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET /health`
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
