//! Client error types

use thiserror::Error;

/// Errors returned by API calls
///
/// Cloneable so a single settled request can be handed to every caller
/// waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The API answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The operation needs a signed-in user and none could be established
    #[error("Authentication required")]
    AuthRequired,
}

impl ClientError {
    /// HTTP status of a `Status` error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
