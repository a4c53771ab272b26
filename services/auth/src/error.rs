//! HTTP-facing errors for authentication and the access guard

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Why a request was rejected as unauthenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    NoToken,
    InvalidToken,
}

impl UnauthorizedReason {
    pub fn message(&self) -> &'static str {
        match self {
            UnauthorizedReason::NoToken => "Unauthorized - No Token Provided",
            UnauthorizedReason::InvalidToken => "Unauthorized - Invalid Token",
        }
    }
}

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{}", .0.message())]
    Unauthorized(UnauthorizedReason),

    /// A valid token whose user no longer exists
    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal Server Error")]
    InternalServerError,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::BadRequest(_) | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}
