//! GET /status — health check endpoint, polled by the frontend.

use axum::Json;
use serde::Serialize;

/// Response body for /status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Handler: GET /status
///
/// Always reports ok; performs no upstream probe.
pub async fn check_status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}
