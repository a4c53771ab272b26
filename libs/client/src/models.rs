//! Request and response bodies exchanged with the API

use serde::{Deserialize, Serialize};

/// Signed-in user as returned by the auth routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: SessionUser,
}

/// Failure envelope `{success: false, message}`
#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}
