//! API service configuration

use anyhow::{Context, Result};
use axum::http::{HeaderValue, header};
use common::config::RuntimeMode;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Port the API listens on when `PORT` is unset
pub const DEFAULT_PORT: u16 = 5000;

/// Origin of the web client in development
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:5001";

/// API service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mode: RuntimeMode,
    pub client_origin: String,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: Listening port (default: 5000)
    /// - `NODE_ENV` / `APP_ENV`: Runtime mode (default: development)
    /// - `CLIENT_ORIGIN`: Allowed CORS origin outside production
    ///   (default: http://localhost:5001)
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", value))?,
            Err(_) => DEFAULT_PORT,
        };

        let client_origin = std::env::var("CLIENT_ORIGIN")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_ORIGIN.to_string());

        Ok(AppConfig {
            port,
            mode: RuntimeMode::from_env(),
            client_origin,
        })
    }

    /// CORS policy for the web client
    ///
    /// Credentials are always allowed so the session cookie travels with
    /// cross-origin requests. Production mirrors the caller's origin; other
    /// modes only admit `client_origin`.
    pub fn cors_layer(&self) -> Result<CorsLayer> {
        let origin = if self.mode.is_production() {
            AllowOrigin::mirror_request()
        } else {
            let origin = HeaderValue::from_str(&self.client_origin)
                .with_context(|| format!("Invalid CLIENT_ORIGIN: {}", self.client_origin))?;
            AllowOrigin::exact(origin)
        };

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::CACHE_CONTROL,
                header::PRAGMA,
                header::EXPIRES,
            ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        routing::get,
    };
    use serial_test::serial;
    use tower::ServiceExt;

    fn clear_env() {
        unsafe {
            std::env::remove_var("PORT");
            std::env::remove_var("CLIENT_ORIGIN");
            std::env::remove_var("NODE_ENV");
            std::env::remove_var("APP_ENV");
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.mode, RuntimeMode::Development);
        assert_eq!(config.client_origin, DEFAULT_CLIENT_ORIGIN);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("PORT", "8080");
            std::env::set_var("CLIENT_ORIGIN", "https://marquee.example");
            std::env::set_var("NODE_ENV", "production");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.mode.is_production());
        assert_eq!(config.client_origin, "https://marquee.example");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_rejected() {
        clear_env();
        unsafe {
            std::env::set_var("PORT", "not-a-port");
        }

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_cors_layer_rejects_bad_origin() {
        let config = AppConfig {
            port: DEFAULT_PORT,
            mode: RuntimeMode::Development,
            client_origin: "bad\norigin".to_string(),
        };
        assert!(config.cors_layer().is_err());
    }

    #[tokio::test]
    async fn test_preflight_allows_client_headers() {
        let config = AppConfig {
            port: DEFAULT_PORT,
            mode: RuntimeMode::Development,
            client_origin: DEFAULT_CLIENT_ORIGIN.to_string(),
        };
        let app = Router::new()
            .route("/api/v1/movie/trending", get(|| async { "ok" }))
            .layer(config.cors_layer().unwrap());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/v1/movie/trending")
                    .header(header::ORIGIN, DEFAULT_CLIENT_ORIGIN)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .header(
                        header::ACCESS_CONTROL_REQUEST_HEADERS,
                        "cache-control,pragma,expires",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            DEFAULT_CLIENT_ORIGIN
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        for name in ["content-type", "cache-control", "pragma", "expires"] {
            assert!(allowed.contains(name), "{} missing from {}", name, allowed);
        }
    }
}
