//! Mock film catalog for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::films::{CatalogError, FilmCatalog, FilmRecord};

/// Mock implementation of the FilmCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return films whose title contains the query (case-insensitive), in
///   the order they were added
/// - Track queries for assertions
/// - Simulate failures, once or for a specific query
///
/// # Example
///
/// ```rust,ignore
/// use sommelier_core::testing::{MockFilmCatalog, fixtures};
///
/// let catalog = MockFilmCatalog::new();
/// catalog.add_film(fixtures::film(27205, "Inception", "2010")).await;
///
/// let results = catalog.search_movies("incep").await?;
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockFilmCatalog {
    /// Films in ranking order.
    films: Arc<RwLock<Vec<FilmRecord>>>,
    /// Queries that always fail.
    failing_queries: Arc<RwLock<HashSet<String>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<String>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockFilmCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFilmCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            films: Arc::new(RwLock::new(Vec::new())),
            failing_queries: Arc::new(RwLock::new(HashSet::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a film at the end of the ranking.
    pub async fn add_film(&self, film: FilmRecord) {
        self.films.write().await.push(film);
    }

    /// Replace all films.
    pub async fn set_films(&self, films: Vec<FilmRecord>) {
        *self.films.write().await = films;
    }

    /// Make every search for exactly this query fail.
    pub async fn fail_query(&self, query: &str) {
        self.failing_queries.write().await.insert(query.to_string());
    }

    /// Set an error to be returned on the next search.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    /// Number of searches made so far.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }
}

#[async_trait]
impl FilmCatalog for MockFilmCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<FilmRecord>, CatalogError> {
        self.queries.write().await.push(query.to_string());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if self.failing_queries.read().await.contains(query) {
            return Err(CatalogError::ApiError {
                status: 500,
                message: format!("Simulated failure for '{}'", query),
            });
        }

        let needle = query.to_lowercase();
        let films = self.films.read().await;
        Ok(films
            .iter()
            .filter(|f| f.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
