//! Prompt assembly for the /chat relay.
//!
//! Pure string composition: a mode instruction, the user turn, and a context
//! block rendered from the tail of the conversation history. The upstream
//! call itself lives in `llm-service`.

use crate::routes::chat::chat_request::ChatRequest;

/// How many trailing history messages make it into the context block.
/// Older entries are accepted and ignored.
const HISTORY_WINDOW: usize = 5;

/// Assembles the single prompt string sent upstream.
///
/// Shape, innermost first:
/// - user portion: the message text, reworded when an image is attached
///   (the image bytes themselves are never forwarded);
/// - mode instruction prefixed directly in front of it;
/// - if any history exists, a `Conversation history:` block prepended on top.
pub fn build_prompt(req: &ChatRequest) -> String {
    let user_part = match req.message.image.as_deref() {
        Some(img) if !img.is_empty() => {
            format!(
                "The user has shared an image and asks: {}",
                req.message.text
            )
        }
        _ => req.message.text.clone(),
    };

    let mut prompt = format!("{}{}", req.mode.instruction(), user_part);

    let messages = &req.history.messages;
    if !messages.is_empty() {
        let tail = &messages[messages.len().saturating_sub(HISTORY_WINDOW)..];
        let context = tail
            .iter()
            .map(|m| format!("{}: {}", m.sender.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n");
        prompt = format!("Conversation history:\n{context}\n\n{prompt}");
    }

    prompt
}
