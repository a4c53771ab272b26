//! Shared application state

use auth::AuthState;
use axum::extract::FromRef;
use tmdb::TmdbClient;

/// State shared by every API handler
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub tmdb: TmdbClient,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
