//! Client-side data access for the Marquee API
//!
//! A cookie-carrying HTTP client, an auth store that tracks the signed-in
//! user, typed catalog wrappers and the trending-content hook used by the
//! home screen.

pub mod api;
pub mod auth_store;
pub mod catalog;
pub mod config;
pub mod error;
pub mod inflight;
pub mod models;
pub mod trending;

pub use api::ApiClient;
pub use auth_store::{AuthSnapshot, AuthStore};
pub use catalog::CatalogClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use trending::{TrendingHook, TrendingState};
