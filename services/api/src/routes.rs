//! API service routes

mod catalog;
mod search;

use axum::{Json, Router, middleware, response::IntoResponse, routing::get};
use serde_json::json;
use tmdb::MediaKind;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use auth::middleware::require_auth;

/// Create the router for the API service
///
/// Catalog and search routes sit behind the access guard; `/health` and the
/// auth routes are reachable without a session.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let protected_routes = Router::new()
        .nest("/api/v1/movie", catalog::router(MediaKind::Movie))
        .nest("/api/v1/tv", catalog::router(MediaKind::Tv))
        .nest("/api/v1/search", search::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_check))
        .nest_service(
            "/api/v1/auth",
            auth::routes::create_router(state.auth.clone()),
        )
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}
