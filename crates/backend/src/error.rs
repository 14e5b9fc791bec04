//! Document store error type.

use thiserror::Error;

/// Errors that can occur when interacting with the hosted document store.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// Document not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited; retry after the given number of seconds.
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    /// Failed to parse a document body.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Client construction failed (bad base URL or API key).
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl DocStoreError {
    /// Whether this error means the document simply does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
