pub mod config;
pub mod films;
pub mod metrics;
pub mod recommend;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, SanitizedConfig, ServerConfig,
};
pub use films::{CatalogError, FilmCatalog, FilmRecord, FilmResolver, TmdbClient, TmdbConfig};
pub use recommend::{
    AnthropicClient, LikedFilm, LlmClient, LlmConfig, LlmError, Recommendation,
    RecommendError, RecommendationRequest, Recommender,
};
