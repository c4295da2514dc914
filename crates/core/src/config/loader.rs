use figment::{
    providers::{Env, Format, Toml},
    value::{Uncased, UncasedStr},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Plain environment variables honoured for compatibility with the
/// original deployment, mapped to their config paths.
const LEGACY_ENV: [(&str, &str); 3] = [
    ("TMDB_API_KEY", "tmdb.api_key"),
    ("ANTHROPIC_API_KEY", "llm.api_key"),
    ("PORT", "server.port"),
];

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    extract(Figment::new())
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(base: Figment) -> Result<Config, ConfigError> {
    let legacy_names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();

    base.merge(Env::prefixed("SOMMELIER_").split("__"))
        .merge(Env::raw().only(&legacy_names).map(legacy_key))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn legacy_key(key: &UncasedStr) -> Uncased<'_> {
    LEGACY_ENV
        .iter()
        .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
        .map(|(_, path)| Uncased::from(*path))
        .unwrap_or_else(|| Uncased::from(key.as_str()))
}
