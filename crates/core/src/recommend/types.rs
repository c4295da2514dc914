//! Recommendation request and result types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::films::{FilmRecord, UNKNOWN_YEAR};

/// A film the user enjoyed.
///
/// Only the title and year reach the prompt; any other fields a client
/// sends along (typically a whole [`FilmRecord`]) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikedFilm {
    pub title: String,
    #[serde(default = "unknown_year", deserialize_with = "year_text")]
    pub year: String,
}

impl LikedFilm {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
        }
    }
}

impl From<FilmRecord> for LikedFilm {
    fn from(film: FilmRecord) -> Self {
        Self {
            title: film.title,
            year: film.year,
        }
    }
}

fn unknown_year() -> String {
    UNKNOWN_YEAR.to_string()
}

/// Accept the year as either a string or a bare number.
fn year_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
        Missing(()),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(text) => text,
        Year::Number(n) => n.to_string(),
        Year::Missing(()) => unknown_year(),
    })
}

/// Input to the recommendation synthesizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Films the user liked, in the order given.
    pub films: Vec<LikedFilm>,
    /// What the user liked about them.
    #[serde(default)]
    pub context: Option<String>,
    /// Titles the user has already seen.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub exclude_films: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One recommended film.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub reason: String,
}
