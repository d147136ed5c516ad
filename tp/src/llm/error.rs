//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM operations
///
/// Nothing here is retried; callers see every failure exactly once.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl LlmError {
    /// Map a failed HTTP status to an error, reading `retry-after` on 429
    pub(crate) fn from_status(status: u16, retry_after: Option<&str>, body: String) -> Self {
        if status == 429 {
            let secs = retry_after.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(60);
            return LlmError::RateLimited {
                retry_after: Duration::from_secs(secs),
            };
        }
        LlmError::ApiError { status, message: body }
    }
}
