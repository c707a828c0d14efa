/// Configuration for an upstream chat-completions invocation.
///
/// Built once at startup (see [`crate::config::default_config`]) and handed
/// to [`crate::GroqService::new`]; never reloaded per request, so the model
/// identity and sampling parameters are fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"llama-3.1-8b-instant"`).
    pub model: String,

    /// API base URL (e.g., `"https://api.groq.com/openai/v1"`).
    pub endpoint: String,

    /// API key for authentication. Required by the hosted endpoint.
    pub api_key: Option<String>,

    /// Sampling temperature. `Some(0.0)` for deterministic output.
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}
