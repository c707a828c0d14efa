use std::sync::Arc;

use llm_service::{GroqService, config::default_config::config_groq};

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
///
/// Read-only after startup; every request sees the same upstream client.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide client for the hosted chat model, initialized once.
    pub llm: Arc<GroqService>,
}

impl AppState {
    /// Builds state around an already-constructed upstream client.
    pub fn new(llm: Arc<GroqService>) -> Self {
        Self { llm }
    }

    /// Load shared state from environment variables.
    ///
    /// Fails at startup when the upstream credential is missing, rather than
    /// on the first `/chat` call.
    pub fn from_env() -> AppResult<Self> {
        let cfg = config_groq()?;
        let llm = GroqService::new(cfg)?;
        Ok(Self::new(Arc::new(llm)))
    }
}
