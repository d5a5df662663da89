//! Health check endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// Health check envelope.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "ASGRC catalog service is running".to_string(),
    })
}

/// Creates the health router.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}
