//! Maps axum's built-in body-rejection responses to the JSON error envelope.
//!
//! `Json<T>` extractor rejections (malformed JSON, schema mismatch, wrong
//! content type) are rendered by axum as plain text before any handler runs.
//! This layer rewraps those responses so clients always receive the same
//! `{"error","message"}` body the handlers produce.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

#[derive(Serialize)]
struct RejectionBody<'a> {
    error: &'a str,
    message: String,
}

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

/// Rewrites plain-text 400/415/422 responses into the JSON envelope.
///
/// Responses that are already JSON (e.g. produced by `AppError`) pass
/// through untouched, as does every other status.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;

    let code = match res.status() {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        _ => return res,
    };

    let already_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);
    if already_json {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;
    let original = String::from_utf8_lossy(&bytes);

    let envelope = RejectionBody {
        error: code,
        message: original.trim().to_string(),
    };

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    // The old content-length belongs to the discarded text body.
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, body.into())
}
