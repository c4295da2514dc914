//! Normalized film metadata.

use serde::{Deserialize, Serialize};

/// Year reported when the source has no release date.
pub const UNKNOWN_YEAR: &str = "N/A";

/// A film as returned to callers, normalized from a catalog search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmRecord {
    /// Catalog (TMDB) movie ID.
    pub id: u32,
    /// Film title.
    pub title: String,
    /// Release year, or [`UNKNOWN_YEAR`].
    pub year: String,
    /// Synopsis.
    #[serde(default)]
    pub overview: String,
    /// Poster path (relative to the TMDB image base URL).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average vote (0-10).
    #[serde(default)]
    pub vote_average: f32,
}

/// Derive the display year from a `YYYY-MM-DD` release date.
///
/// Takes the leading date component as-is; an absent or empty date yields
/// [`UNKNOWN_YEAR`].
pub fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if !date.is_empty() => date
            .split('-')
            .next()
            .unwrap_or(date)
            .to_string(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}
