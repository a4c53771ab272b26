//! Authentication for the Marquee application
//!
//! Session tokens, the session cookie, the access guard placed in front of
//! catalog routes, the user store and the `/auth` routes.

use std::sync::Arc;

pub mod database;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod validation;

use crate::{jwt::JwtService, repositories::UserStore, session::CookieConfig};

/// State shared by the authentication routes and the access guard
#[derive(Clone)]
pub struct AuthState {
    pub jwt_service: JwtService,
    pub user_store: Arc<dyn UserStore>,
    pub cookie_config: CookieConfig,
}
