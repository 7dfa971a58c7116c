//! Error types for the item usage pipeline

use thiserror::Error;

/// Result type for delivery API and usage operations
pub type Result<T> = std::result::Result<T, UsageError>;

/// Errors that abort a usage query.
///
/// Unresolved references are not represented here: they are absorbed by the
/// reference extractor and only logged.
#[derive(Error, Debug)]
pub enum UsageError {
    /// Required setting missing or blank; raised before any request is made
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid response from delivery API: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Pagination did not advance past {0}")]
    StalledPagination(String),
}

impl UsageError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the failure happened while talking to the delivery API
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}
