//! Signed-in user state shared across the client

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use crate::{
    api::ApiClient,
    error::ClientResult,
    inflight::InFlight,
    models::{LoginRequest, SessionUser, SignupRequest, UserEnvelope},
};

const AUTH_CHECK: &str = "auth_check";

/// Point-in-time view of the auth state
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub user: Option<SessionUser>,
    pub is_checking_auth: bool,
    pub auth_check_failed: bool,
    pub is_signing_up: bool,
    pub is_logging_in: bool,
    pub is_logging_out: bool,
}

impl Default for AuthSnapshot {
    /// Before the first check the session is unknown, so it counts as
    /// being checked.
    fn default() -> Self {
        AuthSnapshot {
            user: None,
            is_checking_auth: true,
            auth_check_failed: false,
            is_signing_up: false,
            is_logging_in: false,
            is_logging_out: false,
        }
    }
}

/// Auth operations and the resulting user state
#[derive(Clone)]
pub struct AuthStore {
    api: ApiClient,
    state: Arc<Mutex<AuthSnapshot>>,
    inflight: InFlight<SessionUser>,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        AuthStore {
            api,
            state: Arc::new(Mutex::new(AuthSnapshot::default())),
            inflight: InFlight::new(),
        }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        lock(&self.state).clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        lock(&self.state).user.clone()
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<SessionUser> {
        info!("Signup attempt with: {}", request.email);
        update(&self.state, |s| s.is_signing_up = true);

        let result = self
            .api
            .post::<_, UserEnvelope>("/api/v1/auth/signup", request)
            .await
            .map(|envelope| envelope.user);

        update(&self.state, |s| {
            s.is_signing_up = false;
            s.user = result.as_ref().ok().cloned();
        });
        if let Err(e) = &result {
            warn!("Signup failed: {}", e);
        }
        result
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<SessionUser> {
        info!("Login attempt with: {}", request.email);
        update(&self.state, |s| s.is_logging_in = true);

        let result = self
            .api
            .post::<_, UserEnvelope>("/api/v1/auth/login", request)
            .await
            .map(|envelope| envelope.user);

        update(&self.state, |s| {
            s.is_logging_in = false;
            s.user = result.as_ref().ok().cloned();
        });
        if let Err(e) = &result {
            warn!("Login failed: {}", e);
        }
        result
    }

    /// Clear the session. On failure the current user is kept.
    pub async fn logout(&self) -> ClientResult<()> {
        update(&self.state, |s| s.is_logging_out = true);

        let result = self
            .api
            .post_empty::<serde_json::Value>("/api/v1/auth/logout")
            .await
            .map(|_| ());

        update(&self.state, |s| {
            s.is_logging_out = false;
            if result.is_ok() {
                s.user = None;
            }
        });
        if let Err(e) = &result {
            warn!("Logout failed: {}", e);
        }
        result
    }

    /// Ask the API who the session cookie belongs to
    ///
    /// Calls made while a check is already running wait for that check
    /// instead of issuing another request.
    pub async fn auth_check(&self) -> ClientResult<SessionUser> {
        let api = self.api.clone();
        let state = Arc::clone(&self.state);

        self.inflight
            .run(AUTH_CHECK, move || async move {
                info!("Checking authentication status");
                update(&state, |s| s.is_checking_auth = true);

                let result = api
                    .get::<UserEnvelope>("/api/v1/auth/authCheck")
                    .await
                    .map(|envelope| envelope.user);

                update(&state, |s| {
                    s.is_checking_auth = false;
                    s.auth_check_failed = result.is_err();
                    s.user = result.as_ref().ok().cloned();
                });
                if let Err(e) = &result {
                    warn!("Auth check failed: {}", e);
                }
                result
            })
            .await
    }

    pub fn reset_auth_state(&self) {
        update(&self.state, |s| {
            s.is_checking_auth = false;
            s.auth_check_failed = false;
        });
    }
}

fn lock(state: &Mutex<AuthSnapshot>) -> std::sync::MutexGuard<'_, AuthSnapshot> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn update(state: &Mutex<AuthSnapshot>, f: impl FnOnce(&mut AuthSnapshot)) {
    let mut guard = lock(state);
    f(&mut *guard);
}
