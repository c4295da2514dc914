//! Recommendation API handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use sommelier_core::{Recommendation, RecommendationRequest};
use tracing::debug;

use super::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

/// Response for a successful recommendation request
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    pub recommendations: Vec<Recommendation>,
}

/// POST /api/recommendations
///
/// Generate recommendations from the films the user liked.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendationsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let body = match body {
        Ok(Json(body)) if body.get("films").is_some_and(Value::is_array) => body,
        Ok(_) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Films array is required",
            ));
        }
        Err(rejection) => {
            debug!(error = %rejection, "Rejected recommendation body");
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Films array is required",
            ));
        }
    };

    let request: RecommendationRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Malformed recommendation request");
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Invalid recommendation request",
            ));
        }
    };

    match state.recommender().recommend(&request).await {
        Ok(recommendations) => Ok(Json(RecommendationsResponse {
            success: true,
            recommendations,
        })),
        Err(e) if e.is_invalid_request() => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Films array is required",
        )),
        // Already logged with its cause by the recommender
        Err(_) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to get recommendations",
        )),
    }
}
