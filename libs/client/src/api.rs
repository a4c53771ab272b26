//! HTTP transport for the Marquee API

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
    models::MessageEnvelope,
};

/// Cookie-carrying client for the Marquee API
///
/// The session cookie set by signup or login is kept in the client's cookie
/// store and sent with every later request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path)?;
        self.send(request).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request).await
    }

    /// POST without a request body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::POST, path)?;
        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        debug!("{} {}", method, url);
        Ok(self
            .http
            .request(method, url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache"))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }

    let message = serde_json::from_str::<MessageEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    warn!("API request failed with {}: {}", status, message);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
