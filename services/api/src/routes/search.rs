//! Free-text search

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::info;

use crate::{error::ApiError, state::AppState};

const NO_RESULTS: &str = "No results found";

pub fn router() -> Router<AppState> {
    Router::new().route("/:type/:query", get(search))
}

/// Search `content_type` (`movie`, `tv`, `person`, ...) for `query`
pub async fn search(
    State(state): State<AppState>,
    Path((content_type, query)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Searching {} for {:?}", content_type, query);
    let page = state
        .tmdb
        .search(&content_type, &query)
        .await
        .map_err(|e| ApiError::from_upstream(e, NO_RESULTS))?;

    if page.is_empty() {
        return Err(ApiError::NotFound(NO_RESULTS.to_string()));
    }

    Ok(Json(json!({ "success": true, "content": page.results })))
}
