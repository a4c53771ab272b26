//! Trending-content hook for the home screen

use serde_json::Map;
use tmdb::{CatalogItem, MediaKind};
use tracing::{info, warn};

use crate::{auth_store::AuthStore, catalog::CatalogClient, error::ClientError};

/// Marker in provider credential failures
const INVALID_API_KEY: &str = "Invalid API key";

/// What the home screen renders for the trending slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingState {
    pub content: Option<CatalogItem>,
    pub is_loading: bool,
    pub error: Option<ClientError>,
    pub retry_count: u32,
    pub used_placeholder: bool,
}

/// Loads one trending item for a content kind
pub struct TrendingHook {
    auth: AuthStore,
    catalog: CatalogClient,
    kind: MediaKind,
    state: TrendingState,
}

impl TrendingHook {
    pub fn new(auth: AuthStore, catalog: CatalogClient, kind: MediaKind) -> Self {
        TrendingHook {
            auth,
            catalog,
            kind,
            state: TrendingState {
                is_loading: true,
                ..TrendingState::default()
            },
        }
    }

    pub fn state(&self) -> &TrendingState {
        &self.state
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Switch content kind and reload
    pub async fn set_kind(&mut self, kind: MediaKind) -> &TrendingState {
        self.kind = kind;
        self.load().await
    }

    /// Reload, counting the attempt
    pub async fn retry(&mut self) -> &TrendingState {
        self.state.retry_count += 1;
        info!("Retrying trending fetch (attempt {})", self.state.retry_count + 1);
        self.load().await
    }

    pub async fn load(&mut self) -> &TrendingState {
        if self.auth.user().is_none() {
            info!("No user found, performing auth check");
            if self.auth.auth_check().await.is_err() {
                self.state.is_loading = false;
                self.state.error = Some(ClientError::AuthRequired);
                return &self.state;
            }
        }

        self.state.is_loading = true;
        self.state.error = None;

        match self.catalog.trending(self.kind).await {
            Ok(item) => {
                self.state.content = Some(item);
                self.state.used_placeholder = false;
            }
            Err(ClientError::Status { status: 401, message }) if message.contains(INVALID_API_KEY) => {
                warn!("Using placeholder trending {} after credential failure", self.kind);
                self.state.content = Some(placeholder(self.kind));
                self.state.used_placeholder = true;
            }
            Err(err) => {
                warn!("Failed to load trending {}: {}", self.kind, err);
                let unauthorized = err.status() == Some(401);
                self.state.error = Some(err);
                if unauthorized {
                    if let Err(e) = self.auth.auth_check().await {
                        warn!("Session recheck after 401 failed: {}", e);
                    }
                }
            }
        }

        self.state.is_loading = false;
        &self.state
    }
}

/// Local stand-in shown when the provider rejects the API key
pub fn placeholder(kind: MediaKind) -> CatalogItem {
    match kind {
        MediaKind::Movie => CatalogItem {
            id: 100,
            title: Some("The Matrix Resurrections".to_string()),
            name: None,
            overview: Some("Return to a world of two realities: one, everyday life; the other, what lies behind it. To find out if his reality is a construct, to truly know himself, Neo will have to follow the white rabbit once more.".to_string()),
            poster_path: Some("/placeholder.png".to_string()),
            backdrop_path: Some("/placeholder.png".to_string()),
            vote_average: Some(8.5),
            release_date: Some("2023-12-22".to_string()),
            first_air_date: None,
            extra: Map::new(),
        },
        MediaKind::Tv => CatalogItem {
            id: 200,
            title: None,
            name: Some("Stranger Things 5".to_string()),
            overview: Some("When a young boy vanishes, a small town uncovers a mystery involving secret experiments, terrifying supernatural forces and one strange little girl.".to_string()),
            poster_path: Some("/placeholder.png".to_string()),
            backdrop_path: Some("/placeholder.png".to_string()),
            vote_average: Some(9.2),
            release_date: None,
            first_air_date: None,
            extra: Map::new(),
        },
    }
}
