//! Access guard: cookie session validation ahead of protected routes

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info, warn};

use crate::{
    AuthState,
    error::{AuthError, UnauthorizedReason},
    models::UserProfile,
    session::SESSION_COOKIE,
};

/// Authenticated user attached to admitted requests
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

/// Reject the request unless it carries a valid session for an existing
/// user; otherwise attach [`CurrentUser`] and continue.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    info!("Protecting route: {}", req.uri());

    let user = authenticate(&state, req.headers()).await?;
    info!("User authenticated successfully: {}", user.username);

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Resolve the session cookie in `headers` to a user profile
pub async fn authenticate(state: &AuthState, headers: &HeaderMap) -> Result<UserProfile, AuthError> {
    let jar = CookieJar::from_headers(headers);

    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            info!("No session token found in cookies");
            AuthError::Unauthorized(UnauthorizedReason::NoToken)
        })?;

    let user_id = state.jwt_service.verify(token).map_err(|e| {
        warn!("Session token verification failed: {}", e);
        AuthError::Unauthorized(UnauthorizedReason::InvalidToken)
    })?;

    let user = state
        .user_store
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            AuthError::InternalServerError
        })?
        .ok_or_else(|| {
            warn!("User not found for session token: {}", user_id);
            AuthError::UserNotFound
        })?;

    Ok(user.into())
}
