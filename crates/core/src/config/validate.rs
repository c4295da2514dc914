use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Both API keys are present
/// - LLM model, token budget and timeouts are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.tmdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.api_key is required (or set TMDB_API_KEY)".to_string(),
        ));
    }
    if config.tmdb.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tmdb.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.llm.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "llm.api_key is required (or set ANTHROPIC_API_KEY)".to_string(),
        ));
    }
    if config.llm.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "llm.model cannot be empty".to_string(),
        ));
    }
    if config.llm.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "llm.max_tokens cannot be 0".to_string(),
        ));
    }
    if config.llm.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "llm.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
