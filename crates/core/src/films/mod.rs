//! Film metadata lookup.
//!
//! A [`FilmCatalog`] searches an external film database (TMDB in production).
//! The [`FilmResolver`] sits on top of it and turns free-text titles into
//! normalized [`FilmRecord`]s, folding lookup failures into "not found".

mod resolver;
mod tmdb;
mod types;

pub use resolver::{FilmResolver, SUGGESTION_LIMIT};
pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying a film catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for film catalog clients.
#[async_trait]
pub trait FilmCatalog: Send + Sync {
    /// Catalog name for logging and metrics.
    fn name(&self) -> &str;

    /// Search movies by free-text title.
    ///
    /// Returns the first page of matches in the catalog's own relevance
    /// order. Zero matches is an empty vector, not an error.
    async fn search_movies(&self, query: &str) -> Result<Vec<FilmRecord>, CatalogError>;
}
