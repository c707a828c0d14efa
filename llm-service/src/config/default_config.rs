//! Default LLM config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `GROQ_API_KEY`     = API credential (mandatory)
//! - `GROQ_URL`         = API base URL (optional, defaults to the hosted endpoint)
//! - `GROQ_MODEL`       = model identifier (optional)
//! - `LLM_TIMEOUT_SECS` = request timeout in seconds (optional, u64)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{Result, env_opt_u64, must_env},
};

const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Constructs the config for the hosted Groq chat model.
///
/// The credential is resolved at startup so a missing key fails the process
/// immediately instead of surfacing on the first `/chat` call.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
///
/// # Errors
/// - [`crate::error_handler::ConfigError::MissingVar`] if `GROQ_API_KEY` is absent or empty
/// - [`crate::error_handler::ConfigError::InvalidNumber`] if `LLM_TIMEOUT_SECS` is not a u64
pub fn config_groq() -> Result<LlmModelConfig> {
    let api_key = must_env("GROQ_API_KEY")?;

    let endpoint = std::env::var("GROQ_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.into());

    let model = std::env::var("GROQ_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.into());

    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        temperature: Some(0.0),
        max_tokens: None,
        timeout_secs: Some(timeout_secs),
    })
}
