//! Recommendation synthesis.
//!
//! Builds a prompt from the user's liked films, asks a language model for
//! suggestions through an [`LlmClient`], and parses the reply into
//! [`Recommendation`]s.

mod config;
mod llm;
mod prompt;
mod recommender;
mod types;

pub use config::LlmConfig;
pub use llm::{
    AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage,
};
pub use prompt::{build_prompt, RECOMMENDATION_COUNT};
pub use recommender::{parse_recommendations, RecommendError, Recommender};
pub use types::{LikedFilm, Recommendation, RecommendationRequest};
