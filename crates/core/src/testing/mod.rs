//! Testing utilities and mock implementations.
//!
//! Mocks for both upstream services, so the resolver, the recommender and
//! the HTTP layer can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use sommelier_core::testing::{fixtures, MockFilmCatalog, MockLlmClient};
//!
//! let catalog = MockFilmCatalog::new();
//! catalog.add_film(fixtures::film(27205, "Inception", "2010")).await;
//!
//! let llm = MockLlmClient::new();
//! llm.set_response(r#"[{"title": "Memento", "reason": "..."}]"#).await;
//! ```

mod mock_film_catalog;
mod mock_llm_client;

pub use mock_film_catalog::MockFilmCatalog;
pub use mock_llm_client::MockLlmClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::films::FilmRecord;
    use crate::recommend::Recommendation;

    /// Create a test film record with reasonable defaults.
    pub fn film(id: u32, title: &str, year: &str) -> FilmRecord {
        FilmRecord {
            id,
            title: title.to_string(),
            year: year.to_string(),
            overview: format!("A film called {}.", title),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            vote_average: 7.5,
        }
    }

    /// Create a test recommendation.
    pub fn recommendation(title: &str) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            reason: format!("You will like {}.", title),
        }
    }

    /// Render recommendations the way the model replies.
    pub fn recommendations_json(titles: &[&str]) -> String {
        let recs: Vec<Recommendation> = titles.iter().map(|t| recommendation(t)).collect();
        serde_json::to_string_pretty(&recs).unwrap_or_else(|_| "[]".to_string())
    }
}
