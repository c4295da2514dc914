use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::llm::{CompletionRequest, LlmClient, LlmError};
use super::prompt::build_prompt;
use super::types::{Recommendation, RecommendationRequest};

/// Errors from the recommendation synthesizer.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The request named no liked films.
    #[error("At least one film is required")]
    NoFilms,

    /// The language model call failed.
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    /// The model replied with something other than a recommendation list.
    #[error("Invalid recommendation response: {0}")]
    InvalidResponse(String),
}

impl RecommendError {
    /// Whether the caller sent a bad request (as opposed to an upstream failure).
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::NoFilms)
    }
}

/// Turns liked films into recommendations via a language model.
#[derive(Clone)]
pub struct Recommender {
    client: Arc<dyn LlmClient>,
    max_tokens: u32,
}

impl Recommender {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            max_tokens: 2000,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Ask the model for recommendations.
    ///
    /// Exactly one model call per request with at least one film; none
    /// otherwise. The parsed list is returned as the model produced it.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        if request.films.is_empty() {
            debug!("Recommendation request without films");
            return Err(RecommendError::NoFilms);
        }

        let prompt = build_prompt(
            &request.films,
            request.context.as_deref(),
            &request.exclude_films,
        );
        let completion = CompletionRequest::new(prompt).with_max_tokens(self.max_tokens);

        let response = self.client.complete(completion).await.map_err(|e| {
            error!(
                provider = self.client.provider(),
                model = self.client.model(),
                error = %e,
                "Recommendation model call failed"
            );
            RecommendError::from(e)
        })?;

        let recommendations = parse_recommendations(&response.text).inspect_err(|e| {
            error!(error = %e, response = %response.text, "Unusable recommendation response");
        })?;

        for rec in &recommendations {
            if request
                .exclude_films
                .iter()
                .any(|excluded| excluded.eq_ignore_ascii_case(&rec.title))
            {
                warn!(title = %rec.title, "Model recommended an excluded film");
            }
        }

        info!(
            liked = request.films.len(),
            excluded = request.exclude_films.len(),
            recommended = recommendations.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Generated recommendations"
        );

        Ok(recommendations)
    }
}

/// Parse the model's text into recommendations.
///
/// The whole text must be a JSON array of `{title, reason}` objects. A
/// single markdown code fence wrapping the entire reply is stripped; any
/// other surrounding text makes the reply invalid.
pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, RecommendError> {
    let json = strip_code_fence(text.trim());

    serde_json::from_str(json).map_err(|e| RecommendError::InvalidResponse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return text;
    };

    // Drop the info string (`json`) on the opening line
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}
