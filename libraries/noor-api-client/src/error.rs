//! Error types for the provider client.

use thiserror::Error;

/// Errors that can occur when talking to the Quran or prayer-times provider.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a code other than 200
    #[error("Provider error ({code}): {status}")]
    Provider { code: u16, status: String },

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid provider base URL
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Whether the provider reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Provider { code: 404, .. })
    }
}

/// Result type for provider client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
