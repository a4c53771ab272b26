//! Typed wrappers for the catalog and search routes

use serde::de::DeserializeOwned;
use serde_json::Value;
use tmdb::{CatalogItem, MediaKind, Video};

use crate::{
    api::ApiClient,
    error::{ClientError, ClientResult},
};

#[derive(Debug, Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    pub fn new(api: ApiClient) -> Self {
        CatalogClient { api }
    }

    /// A random item from today's trending list
    pub async fn trending(&self, kind: MediaKind) -> ClientResult<CatalogItem> {
        self.field(&format!("/api/v1/{}/trending", kind), "content")
            .await
    }

    pub async fn trailers(&self, kind: MediaKind, id: &str) -> ClientResult<Vec<Video>> {
        self.field(&format!("/api/v1/{}/{}/trailers", kind, segment(id)), "trailers")
            .await
    }

    /// Full provider record for an item
    pub async fn details(&self, kind: MediaKind, id: &str) -> ClientResult<Value> {
        let key = match kind {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "content",
        };
        self.field(&format!("/api/v1/{}/{}/details", kind, segment(id)), key)
            .await
    }

    pub async fn similar(&self, kind: MediaKind, id: &str) -> ClientResult<Vec<CatalogItem>> {
        let key = match kind {
            MediaKind::Movie => "movies",
            MediaKind::Tv => "similar",
        };
        self.field(&format!("/api/v1/{}/{}/similar", kind, segment(id)), key)
            .await
    }

    pub async fn category(
        &self,
        kind: MediaKind,
        category: &str,
    ) -> ClientResult<Vec<CatalogItem>> {
        self.field(&format!("/api/v1/{}/{}", kind, segment(category)), "content")
            .await
    }

    pub async fn search(&self, content_type: &str, query: &str) -> ClientResult<Vec<CatalogItem>> {
        self.field(
            &format!("/api/v1/search/{}/{}", segment(content_type), segment(query)),
            "content",
        )
        .await
    }

    /// GET `path` and take `key` out of the success envelope
    async fn field<T: DeserializeOwned>(&self, path: &str, key: &str) -> ClientResult<T> {
        let mut body: Value = self.api.get(path).await?;
        let value = body
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| ClientError::Decode(format!("Response is missing `{}`", key)))?;

        Ok(serde_json::from_value(value)?)
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    async fn catalog(server: &MockServer) -> CatalogClient {
        CatalogClient::new(ApiClient::new(ClientConfig::new(&server.uri()).unwrap()).unwrap())
    }

    async fn mount(server: &MockServer, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_envelope_keys_per_kind() {
        let server = MockServer::start().await;
        mount(&server, "/api/v1/movie/603/details", json!({ "success": true, "movie": { "id": 603 } })).await;
        mount(&server, "/api/v1/tv/1399/details", json!({ "success": true, "content": { "id": 1399 } })).await;
        mount(&server, "/api/v1/movie/603/similar", json!({ "success": true, "movies": [{ "id": 604 }] })).await;
        mount(&server, "/api/v1/tv/1399/similar", json!({ "success": true, "similar": [{ "id": 1400 }] })).await;

        let catalog = catalog(&server).await;
        assert_eq!(catalog.details(MediaKind::Movie, "603").await.unwrap()["id"], 603);
        assert_eq!(catalog.details(MediaKind::Tv, "1399").await.unwrap()["id"], 1399);
        assert_eq!(catalog.similar(MediaKind::Movie, "603").await.unwrap()[0].id, 604);
        assert_eq!(catalog.similar(MediaKind::Tv, "1399").await.unwrap()[0].id, 1400);
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/api/v1/search/movie/the%20matrix",
            json!({ "success": true, "content": [{ "id": 603, "title": "The Matrix" }] }),
        )
        .await;

        let results = catalog(&server)
            .await
            .search("movie", "the matrix")
            .await
            .unwrap();
        assert_eq!(results[0].display_title(), Some("The Matrix"));
    }

    #[tokio::test]
    async fn test_missing_field_is_a_decode_error() {
        let server = MockServer::start().await;
        mount(&server, "/api/v1/movie/popular", json!({ "success": true })).await;

        let err = catalog(&server)
            .await
            .category(MediaKind::Movie, "popular")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
