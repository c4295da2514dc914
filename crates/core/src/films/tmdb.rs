//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{release_year, FilmRecord};
use super::{CatalogError, FilmCatalog};
use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS};

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Locale sent with every search.
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.into()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            language: config.language,
        })
    }

    async fn fetch_search_page(&self, query: &str) -> Result<Vec<FilmRecord>, CatalogError> {
        let url = format!("{}/search/movie", self.base_url);

        debug!("TMDB movie search: query='{}'", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", self.language.as_str()),
                ("page", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: TmdbSearchResponse = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse movie search response: {}", e))
        })?;

        Ok(search_result
            .results
            .into_iter()
            .map(FilmRecord::from)
            .collect())
    }
}

#[async_trait]
impl FilmCatalog for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<FilmRecord>, CatalogError> {
        let start = Instant::now();
        let result = self.fetch_search_page(query).await;

        let status = if result.is_ok() { "success" } else { "error" };
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&["tmdb", "search_movie", status])
            .inc();
        EXTERNAL_SERVICE_DURATION
            .with_label_values(&["tmdb", "search_movie"])
            .observe(start.elapsed().as_secs_f64());

        result
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovieResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: u32,
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
}

impl From<TmdbMovieResult> for FilmRecord {
    fn from(r: TmdbMovieResult) -> Self {
        Self {
            id: r.id,
            year: release_year(r.release_date.as_deref()),
            title: r.title,
            overview: r.overview.unwrap_or_default(),
            poster_path: r.poster_path,
            vote_average: r.vote_average.unwrap_or_default(),
        }
    }
}
