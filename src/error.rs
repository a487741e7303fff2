//! Error handling for the model finder

use std::time::Duration;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while configuring the client or listing models.
///
/// The console reports all of these the same way; the variants exist so that
/// library callers and logs can tell them apart.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response
    #[error("API error (status: {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Additional error details
        details: Option<serde_json::Value>,
    },

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded{}", retry_hint(.retry_after))]
    RateLimit {
        /// Suggested retry delay
        retry_after: Option<Duration>,
    },

    /// Configuration error
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(". Retry after {}s", delay.as_secs()),
        None => String::new(),
    }
}

impl Error {
    /// HTTP status of the failure, when the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::RateLimit { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the provider rejected the credential
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(400 | 401 | 403))
    }
}
