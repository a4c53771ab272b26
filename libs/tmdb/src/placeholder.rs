//! In-memory placeholder dataset
//!
//! Served instead of provider data when the provider rejects the API key or
//! when placeholder mode is configured. The dataset is built once and never
//! mutated.

use serde_json::{Value, json};
use std::sync::OnceLock;

/// Which placeholder page answers a given request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    TrendingMovie,
    TrendingTv,
    Empty,
}

const MOVIE_LISTINGS: &[&str] = &[
    "trending/movie",
    "movie/popular",
    "movie/top_rated",
    "movie/upcoming",
    "movie/now_playing",
];

const TV_LISTINGS: &[&str] = &[
    "trending/tv",
    "tv/popular",
    "tv/top_rated",
    "tv/on_the_air",
    "tv/airing_today",
];

/// Best-effort classification of a relative or absolute request path
pub fn classify_path(path: &str) -> Placeholder {
    let path = path.split('?').next().unwrap_or_default();

    if MOVIE_LISTINGS.iter().any(|listing| path.contains(listing)) {
        Placeholder::TrendingMovie
    } else if TV_LISTINGS.iter().any(|listing| path.contains(listing)) {
        Placeholder::TrendingTv
    } else {
        Placeholder::Empty
    }
}

/// Placeholder response body for a request path
pub fn response_for(path: &str) -> &'static Value {
    match classify_path(path) {
        Placeholder::TrendingMovie => trending_movies(),
        Placeholder::TrendingTv => trending_tv(),
        Placeholder::Empty => empty_page(),
    }
}

fn trending_movies() -> &'static Value {
    static PAGE: OnceLock<Value> = OnceLock::new();
    PAGE.get_or_init(|| {
        json!({
            "page": 1,
            "results": [
                {
                    "id": 1,
                    "title": "Dummy Movie 1",
                    "overview": "This is a dummy movie since the API key is invalid",
                    "poster_path": "/placeholder.png",
                    "backdrop_path": "/placeholder.png",
                    "vote_average": 8.5,
                    "release_date": "2023-01-01"
                },
                {
                    "id": 2,
                    "title": "Dummy Movie 2",
                    "overview": "Another dummy movie for testing",
                    "poster_path": "/placeholder.png",
                    "backdrop_path": "/placeholder.png",
                    "vote_average": 7.8,
                    "release_date": "2023-02-15"
                }
            ],
            "total_pages": 1,
            "total_results": 2
        })
    })
}

fn trending_tv() -> &'static Value {
    static PAGE: OnceLock<Value> = OnceLock::new();
    PAGE.get_or_init(|| {
        json!({
            "page": 1,
            "results": [
                {
                    "id": 101,
                    "name": "Dummy TV Show 1",
                    "overview": "This is a dummy TV show since the API key is invalid",
                    "poster_path": "/placeholder.png",
                    "backdrop_path": "/placeholder.png",
                    "vote_average": 8.2
                },
                {
                    "id": 102,
                    "name": "Dummy TV Show 2",
                    "overview": "Another dummy TV show for testing",
                    "poster_path": "/placeholder.png",
                    "backdrop_path": "/placeholder.png",
                    "vote_average": 7.5
                }
            ],
            "total_pages": 1,
            "total_results": 2
        })
    })
}

fn empty_page() -> &'static Value {
    static PAGE: OnceLock<Value> = OnceLock::new();
    PAGE.get_or_init(|| {
        json!({
            "page": 1,
            "results": [],
            "total_pages": 0,
            "total_results": 0
        })
    })
}
