//! HTTP client for the upstream metadata provider

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    config::TmdbConfig,
    error::{TmdbError, TmdbResult, classify},
    models::{CatalogItem, MediaKind, Page, Video},
    placeholder,
};

/// Provider client shared by all request handlers
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    config: Arc<TmdbConfig>,
}

impl TmdbClient {
    /// Create a new client. No request timeout is configured beyond the
    /// `reqwest` defaults.
    pub fn new(config: TmdbConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(http: Client, config: TmdbConfig) -> Self {
        TmdbClient {
            http,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Resolve a request path against the configured base URL
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.config.base_url, path)
        } else {
            format!("{}/{}", self.config.base_url, path)
        }
    }

    /// GET a provider resource and decode it.
    ///
    /// `path` is either relative to the base URL or absolute. A rejected API
    /// key is answered with placeholder data instead of an error; every
    /// other failure is returned to the caller.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> TmdbResult<T> {
        let url = self.resolve(path);
        info!("Making TMDB request to: {}", redacted(&url));

        if self.config.use_placeholder_data {
            info!("Serving placeholder data because USE_DUMMY_DATA=true");
            return Self::placeholder(&url);
        }

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!("TMDB request to {} failed: {}", url, e);
                TmdbError::Transport(e)
            })?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        let body = response.text().await.unwrap_or_default();
        match classify(status, &body) {
            TmdbError::InvalidCredential(message) => {
                warn!("TMDB rejected the API key ({}), using placeholder data", message);
                Self::placeholder(&url)
            }
            err => {
                error!("TMDB error response for {}: {}", url, err);
                Err(err)
            }
        }
    }

    fn placeholder<T: DeserializeOwned>(path: &str) -> TmdbResult<T> {
        Ok(serde_json::from_value(placeholder::response_for(path).clone())?)
    }

    /// Today's trending items
    pub async fn trending(&self, kind: MediaKind) -> TmdbResult<Page<CatalogItem>> {
        self.fetch(&format!("/trending/{}/day?language=en-US", kind))
            .await
    }

    /// Full provider record for a single item
    pub async fn details(&self, kind: MediaKind, id: &str) -> TmdbResult<Value> {
        self.fetch(&format!("/{}/{}?language=en-US", kind, id)).await
    }

    /// Trailers, teasers and other videos for an item
    pub async fn videos(&self, kind: MediaKind, id: &str) -> TmdbResult<Page<Video>> {
        self.fetch(&format!("/{}/{}/videos?language=en-US", kind, id))
            .await
    }

    /// Items similar to the given one (first page only)
    pub async fn similar(&self, kind: MediaKind, id: &str) -> TmdbResult<Page<CatalogItem>> {
        self.fetch(&format!("/{}/{}/similar?language=en-US&page=1", kind, id))
            .await
    }

    /// Category listing such as `popular` or `top_rated` (first page only)
    pub async fn category(
        &self,
        kind: MediaKind,
        category: &str,
    ) -> TmdbResult<Page<CatalogItem>> {
        self.fetch(&format!("/{}/{}?language=en-US&page=1", kind, category))
            .await
    }

    /// Free-text search. `kind` is forwarded verbatim (`movie`, `tv`,
    /// `person`, ...).
    pub async fn search(&self, kind: &str, query: &str) -> TmdbResult<Page<CatalogItem>> {
        self.fetch(&format!(
            "/search/{}?query={}&include_adult=false&language=en-US&page=1",
            urlencoding::encode(kind),
            urlencoding::encode(query)
        ))
        .await
    }
}

/// Request URL as logged, with the API key masked
fn redacted(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}api_key=XXXXX", url, separator)
}
