//! Movie and TV catalog handlers
//!
//! `/movie` and `/tv` share these handlers; the content kind travels as a
//! request extension set when the router is built.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use rand::seq::SliceRandom;
use serde_json::json;
use tmdb::MediaKind;
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Routes for one content kind
pub fn router(kind: MediaKind) -> Router<AppState> {
    Router::new()
        .route("/trending", get(trending))
        .route("/:id/trailers", get(trailers))
        .route("/:id/details", get(details))
        .route("/:id/similar", get(similar))
        // Category names share the `:id` segment with the item routes
        .route("/:id", get(category))
        .layer(Extension(kind))
}

fn not_found_message(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "Movie not found",
        MediaKind::Tv => "TV show not found",
    }
}

/// One random item from today's trending list
pub async fn trending(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
) -> Result<impl IntoResponse, ApiError> {
    const NO_TRENDING: &str = "No trending content available";

    info!("Fetching trending {}", kind);
    let page = state
        .tmdb
        .trending(kind)
        .await
        .map_err(|e| ApiError::from_upstream(e, NO_TRENDING))?;

    let item = page
        .results
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| ApiError::NotFound(NO_TRENDING.to_string()))?;

    Ok(Json(json!({ "success": true, "content": item })))
}

/// Videos attached to an item
///
/// An unknown item yields a bare 404 without an envelope.
pub async fn trailers(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching trailers for {} {}", kind, id);
    let page = state
        .tmdb
        .videos(kind, &id)
        .await
        .map_err(|e| match e {
            tmdb::TmdbError::NotFound => ApiError::NotFoundEmpty,
            other => ApiError::from_upstream(other, not_found_message(kind)),
        })?;

    Ok(Json(json!({ "success": true, "trailers": page.results })))
}

/// Full record for a single item
pub async fn details(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching details for {} {}", kind, id);
    let record = state
        .tmdb
        .details(kind, &id)
        .await
        .map_err(|e| ApiError::from_upstream(e, not_found_message(kind)))?;

    let body = match kind {
        MediaKind::Movie => json!({ "success": true, "movie": record }),
        MediaKind::Tv => json!({ "success": true, "content": record }),
    };
    Ok(Json(body))
}

/// Items similar to the given one
pub async fn similar(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching similar items for {} {}", kind, id);
    let page = state
        .tmdb
        .similar(kind, &id)
        .await
        .map_err(|e| ApiError::from_upstream(e, not_found_message(kind)))?;

    let body = match kind {
        MediaKind::Movie => json!({ "success": true, "movies": page.results }),
        MediaKind::Tv => json!({ "success": true, "similar": page.results }),
    };
    Ok(Json(body))
}

/// Category listing such as `popular` or `top_rated`
pub async fn category(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching {} category {}", kind, category);
    let page = state
        .tmdb
        .category(kind, &category)
        .await
        .map_err(|e| ApiError::from_upstream(e, not_found_message(kind)))?;

    Ok(Json(json!({ "success": true, "content": page.results })))
}
