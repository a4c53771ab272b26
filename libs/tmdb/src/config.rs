//! Upstream provider configuration

use anyhow::Result;

/// Default base URL of the TMDB v3 REST API
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB client configuration
#[derive(Clone)]
pub struct TmdbConfig {
    /// Provider credential, sent as the `api_key` query parameter
    pub api_key: String,
    /// Base URL that relative request paths are joined to
    pub base_url: String,
    /// Serve placeholder data without contacting the provider
    pub use_placeholder_data: bool,
}

impl TmdbConfig {
    /// Create a new TmdbConfig from environment variables
    ///
    /// # Environment Variables
    /// - `TMDB_API_KEY`: Provider credential (required)
    /// - `TMDB_BASE_URL`: Provider base URL (default: "https://api.themoviedb.org/3")
    /// - `USE_DUMMY_DATA`: Serve placeholder data when "true" (default: false)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TMDB_API_KEY")
            .map_err(|_| anyhow::anyhow!("TMDB_API_KEY environment variable not set"))?
            .trim()
            .to_string();

        let base_url =
            std::env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let use_placeholder_data = std::env::var("USE_DUMMY_DATA")
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(TmdbConfig {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            use_placeholder_data,
        })
    }

    /// Configuration pointing at `base_url` with the given credential
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        TmdbConfig {
            api_key: api_key.into().trim().to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            use_placeholder_data: false,
        }
    }
}

impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("use_placeholder_data", &self.use_placeholder_data)
            .finish()
    }
}
