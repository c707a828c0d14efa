//! POST /chat — relays a chat message to the hosted model.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use tracing::info;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::{chat_request::ChatRequest, chat_response::ChatResponse, prompt::build_prompt},
};

/// Handler: POST /chat
///
/// Stateless per call: assembles the prompt, makes exactly one upstream
/// generation request, and wraps the reply. Upstream failures surface as a
/// 502 with the `UPSTREAM_ERROR` envelope; nothing is retried.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"mode":"Auto","message":{"text":"Hi","timestamp":"2025-01-01T00:00:00"},"history":{"messages":[],"images":[]},"chat_id":"c-1"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    info!(
        mode = body.mode.as_str(),
        chat_id = %body.chat_id,
        "received chat request"
    );

    let prompt = build_prompt(&body);

    let preview: String = prompt.chars().take(100).collect();
    info!(prompt_len = prompt.len(), "sending prompt to LLM: {preview}...");

    let response = state.llm.generate(&prompt).await?;

    Ok(Json(ChatResponse {
        response,
        timestamp: Utc::now().to_rfc3339(),
        mode_used: body.mode,
    }))
}
