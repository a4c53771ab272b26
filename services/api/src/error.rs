//! Error envelopes for the catalog routes

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tmdb::TmdbError;
use tracing::error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Not found, rendered with a message envelope
    #[error("Not found: {0}")]
    NotFound(String),

    /// Not found with an empty body
    #[error("Not found")]
    NotFoundEmpty,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    /// Translate an upstream failure, using `not_found` as the 404 message
    pub fn from_upstream(err: TmdbError, not_found: &str) -> Self {
        match err {
            TmdbError::NotFound => ApiError::NotFound(not_found.to_string()),
            other => {
                error!("Upstream request failed: {}", other);
                ApiError::InternalServerError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::NotFoundEmpty => return StatusCode::NOT_FOUND.into_response(),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
