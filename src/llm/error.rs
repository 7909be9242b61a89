//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM requests
///
/// The engine retries every request error identically (fixed sleep, bounded
/// count); only `RetriesExhausted` is terminal for a batch.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Retry budget exhausted; wraps the last underlying error
    #[error("request failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<LlmError>,
    },
}
