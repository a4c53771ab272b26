//! Client for the upstream movie/TV metadata provider (TMDB)
//!
//! The client appends the provider credential to every request and degrades
//! to a small in-memory placeholder dataset when the credential is rejected
//! or when placeholder mode is forced through configuration.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod placeholder;

pub use client::TmdbClient;
pub use config::TmdbConfig;
pub use error::{TmdbError, TmdbResult};
pub use models::{CatalogItem, MediaKind, Page, Video};
