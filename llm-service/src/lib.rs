//! Shared LLM client for the chat relay.
//!
//! The crate owns everything that talks to the hosted inference endpoint:
//! configuration types loaded strictly from environment variables, a unified
//! error type, and a thin non-streaming client ([`GroqService`]) for the
//! OpenAI-compatible `/chat/completions` API.
//!
//! The service is constructed once at startup and shared read-only across
//! requests; see [`services::groq_service`].

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{LlmServiceError, Result};
pub use services::groq_service::GroqService;
