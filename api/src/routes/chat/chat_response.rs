use serde::Serialize;

use crate::routes::chat::chat_request::ChatMode;

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Model reply, verbatim.
    pub response: String,
    /// ISO-8601 time the response was constructed.
    pub timestamp: String,
    /// Echoes the request's mode.
    pub mode_used: ChatMode,
}
