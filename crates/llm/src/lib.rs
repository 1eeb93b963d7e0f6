//! LLM fallback for the chat dispatcher
//!
//! Messages that match no intent may be forwarded to a local Ollama server for a
//! short answer. Every call is bounded by a timeout and any failure simply means
//! "no answer".

pub mod backend;

pub use backend::{labour_law_prompt, FixedBackend, LlmBackend, LlmConfig, OllamaBackend};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
