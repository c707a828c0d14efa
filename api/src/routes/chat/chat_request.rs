use serde::{Deserialize, Serialize};

/// Request payload for /chat.
///
/// `mode` is a closed enum, so a request carrying an unknown or missing mode
/// is rejected at deserialization and never reaches the upstream call.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Which specialist instruction to prefix the prompt with.
    pub mode: ChatMode,
    /// The new user turn.
    pub message: ChatMessage,
    /// Prior turns; only the most recent five are read.
    pub history: ConversationHistory,
    /// Client-side conversation identifier. Logged, never stored.
    pub chat_id: String,
}

/// The new user turn.
#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    /// Encoded image payload. Its presence only changes the prompt wording;
    /// the bytes are never decoded or forwarded.
    #[serde(default)]
    pub image: Option<String>,
    pub timestamp: String,
}

/// One prior turn.
#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub content: String,
    pub sender: Sender,
    pub timestamp: String,
}

/// Image attached to an earlier turn.
#[derive(Debug, Deserialize)]
pub struct ImageAttachment {
    pub content: String,
    pub timestamp: String,
}

/// Chronologically ordered conversation history.
#[derive(Debug, Deserialize)]
pub struct ConversationHistory {
    pub messages: Vec<HistoryEntry>,
    pub images: Vec<ImageAttachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Text,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Specialist mode selecting the fixed instruction prefix.
///
/// Does not alter model selection or sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatMode {
    Auto,
    #[serde(rename = "BrainMRI")]
    BrainMri,
    #[serde(rename = "ChestX-ray")]
    ChestXray,
    Histopathology,
}

impl ChatMode {
    /// Wire name, as it appears in request/response JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            ChatMode::Auto => "Auto",
            ChatMode::BrainMri => "BrainMRI",
            ChatMode::ChestXray => "ChestX-ray",
            ChatMode::Histopathology => "Histopathology",
        }
    }

    /// Fixed instruction prefixed to every prompt for this mode.
    ///
    /// The trailing space is part of the contract: the user text is appended
    /// directly after it.
    pub fn instruction(self) -> &'static str {
        match self {
            ChatMode::BrainMri => {
                "You are a medical AI assistant specializing in Brain MRI analysis. "
            }
            ChatMode::ChestXray => {
                "You are a medical AI assistant specializing in Chest X-ray analysis. "
            }
            ChatMode::Histopathology => {
                "You are a medical AI assistant specializing in Histopathology. "
            }
            ChatMode::Auto => "You are a medical AI assistant. ",
        }
    }
}
