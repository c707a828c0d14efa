//! GET / — service greeting.

use axum::Json;
use serde::Serialize;

/// Response body for /.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Handler: GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello, Med!",
    })
}
