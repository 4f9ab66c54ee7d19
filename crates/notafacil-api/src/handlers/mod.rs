//! HTTP handlers for notafacil-api.

pub mod notes;
pub mod tags;

use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::ApiDoc;

/// Liveness check.
#[utoipa::path(get, path = "/api/health", tag = "System",
    responses((status = 200, description = "Service is up")))]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// OpenAPI document for this API.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
