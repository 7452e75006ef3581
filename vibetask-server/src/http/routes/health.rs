//! Health check endpoint
//!
//! Answers while the process is alive; the store is not probed.

use axum::{routing::get, Json, Router};

use crate::http::envelope::ApiResponse;

/// GET /health
async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Server is running"))
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
