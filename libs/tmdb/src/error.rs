//! Error types for upstream provider calls

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Numeric provider code TMDB returns for a rejected API key
const INVALID_API_KEY_CODE: i64 = 7;

/// Errors returned by [`crate::TmdbClient`]
#[derive(Error, Debug)]
pub enum TmdbError {
    /// The provider rejected the API credential.
    ///
    /// `TmdbClient::fetch` recovers from this by serving placeholder data, so
    /// callers of the client never observe it.
    #[error("TMDB rejected the API key: {0}")]
    InvalidCredential(String),

    /// The requested resource does not exist upstream (HTTP 404)
    #[error("TMDB resource not found (404)")]
    NotFound,

    /// Any other non-success status
    #[error("TMDB request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Network failure or timeout before a response was received
    #[error("TMDB request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Unexpected TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Type alias for Result with TmdbError
pub type TmdbResult<T> = Result<T, TmdbError>;

/// Error body the provider sends alongside non-2xx statuses
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    status_code: Option<i64>,
    #[serde(default)]
    status_message: Option<String>,
}

/// Classify a non-success upstream response into a typed error
pub fn classify(status: StatusCode, body: &str) -> TmdbError {
    let parsed: ProviderErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .status_message
        .clone()
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    let invalid_key = parsed.status_code == Some(INVALID_API_KEY_CODE)
        || message.contains("Invalid API key");

    if status == StatusCode::UNAUTHORIZED && invalid_key {
        TmdbError::InvalidCredential(message)
    } else if status == StatusCode::NOT_FOUND {
        TmdbError::NotFound
    } else {
        TmdbError::Status {
            status: status.as_u16(),
            message,
        }
    }
}
