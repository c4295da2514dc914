//! Film lookup API handlers.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use sommelier_core::FilmRecord;
use tracing::debug;

use super::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the title searches
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

impl SearchParams {
    /// The query, if present and not blank.
    fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}

/// Request body for resolving several titles at once
#[derive(Debug, Deserialize)]
pub struct SearchMultipleBody {
    pub titles: Vec<String>,
}

/// Response for a single resolved film
#[derive(Debug, Serialize)]
pub struct FilmResponse {
    pub film: FilmRecord,
}

/// Response for film lists
#[derive(Debug, Serialize)]
pub struct FilmsResponse {
    pub success: bool,
    pub films: Vec<FilmRecord>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/films/search
///
/// Resolve one title to its best match.
pub async fn search_film(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<FilmResponse>, ApiError> {
    let Some(query) = params.query() else {
        debug!("Film search without query");
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Query parameter is required",
        ));
    };

    match state.resolver().resolve_title(query).await {
        Some(film) => Ok(Json(FilmResponse { film })),
        None => Err(error_response(StatusCode::NOT_FOUND, "Film not found")),
    }
}

/// GET /api/films/search-query
///
/// Autocomplete: up to five matches for a partial title.
pub async fn search_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<FilmsResponse>, ApiError> {
    let Some(query) = params.query() else {
        debug!("Film autocomplete without query");
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Query parameter is required",
        ));
    };

    match state.resolver().suggest(query).await {
        Ok(films) => Ok(Json(FilmsResponse {
            success: true,
            films,
        })),
        Err(_) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to search for films",
        )),
    }
}

/// POST /api/films/search-multiple
///
/// Resolve a list of titles; unresolvable ones are left out.
pub async fn search_multiple(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SearchMultipleBody>, JsonRejection>,
) -> Result<Json<FilmsResponse>, ApiError> {
    let titles = match body {
        Ok(Json(body)) if !body.titles.is_empty() => body.titles,
        Ok(_) => {
            debug!("Empty titles array");
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Titles array is required",
            ));
        }
        Err(rejection) => {
            debug!(error = %rejection, "Rejected search-multiple body");
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Titles array is required",
            ));
        }
    };

    let films = state.resolver().resolve_titles(&titles).await;
    Ok(Json(FilmsResponse {
        success: true,
        films,
    }))
}
