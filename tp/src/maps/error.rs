//! Maps provider error types

use std::time::Duration;
use thiserror::Error;

/// Errors from the maps/places provider
#[derive(Debug, Error)]
pub enum MapsError {
    /// Provider answered with a non-OK status (`REQUEST_DENIED`, `OVER_QUERY_LIMIT`, ...)
    #[error("Maps API error {status}: {message}")]
    Api { status: String, message: String },

    #[error("HTTP error {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl MapsError {
    /// Quota and auth failures; worth a louder log line since degraded
    /// responses still return 200
    pub fn is_access_problem(&self) -> bool {
        match self {
            MapsError::Api { status, .. } => matches!(status.as_str(), "REQUEST_DENIED" | "OVER_QUERY_LIMIT"),
            MapsError::Http(code) => matches!(code, 401 | 403 | 429),
            _ => false,
        }
    }
}
