//! Title resolution on top of a [`FilmCatalog`].

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{CatalogError, FilmCatalog, FilmRecord};

/// Maximum number of autocomplete suggestions.
pub const SUGGESTION_LIMIT: usize = 5;

/// Resolves free-text titles into film records.
///
/// Stateless apart from the shared catalog client; cheap to clone.
#[derive(Clone)]
pub struct FilmResolver {
    catalog: Arc<dyn FilmCatalog>,
}

impl FilmResolver {
    pub fn new(catalog: Arc<dyn FilmCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a single title to its best match.
    ///
    /// Returns `None` both when nothing matches and when the lookup fails;
    /// failures are logged here and never reach the caller.
    pub async fn resolve_title(&self, title: &str) -> Option<FilmRecord> {
        match self.catalog.search_movies(title).await {
            Ok(results) => {
                let film = results.into_iter().next();
                if film.is_none() {
                    debug!(title = %title, catalog = self.catalog.name(), "No film found");
                }
                film
            }
            Err(e) => {
                warn!(
                    title = %title,
                    catalog = self.catalog.name(),
                    error = %e,
                    "Film lookup failed"
                );
                None
            }
        }
    }

    /// Resolve many titles concurrently.
    ///
    /// One independent lookup per input title (duplicates included), all
    /// awaited together. Titles that cannot be resolved are dropped; the
    /// survivors keep their input order.
    pub async fn resolve_titles(&self, titles: &[String]) -> Vec<FilmRecord> {
        let lookups = titles.iter().map(|title| self.resolve_title(title));
        let films: Vec<FilmRecord> = join_all(lookups).await.into_iter().flatten().collect();

        info!(
            requested = titles.len(),
            resolved = films.len(),
            "Resolved film titles"
        );

        films
    }

    /// Autocomplete: up to [`SUGGESTION_LIMIT`] matches in ranking order.
    ///
    /// Unlike [`resolve_title`](Self::resolve_title), upstream failures are
    /// reported so the caller can tell "nothing matched" from "search broke".
    pub async fn suggest(&self, query: &str) -> Result<Vec<FilmRecord>, CatalogError> {
        match self.catalog.search_movies(query).await {
            Ok(mut results) => {
                results.truncate(SUGGESTION_LIMIT);
                Ok(results)
            }
            Err(e) => {
                warn!(
                    query = %query,
                    catalog = self.catalog.name(),
                    error = %e,
                    "Film suggestion search failed"
                );
                Err(e)
            }
        }
    }
}
