//! Client configuration

use std::time::Duration;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Per-request timeout applied to every API call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Configuration for [`crate::ApiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the Marquee API, e.g. `http://localhost:5000`
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a new configuration, validating the URL
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        Ok(ClientConfig {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
