use sommelier_core::{Config, FilmResolver, Recommender, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: FilmResolver,
    recommender: Recommender,
}

impl AppState {
    pub fn new(config: Config, resolver: FilmResolver, recommender: Recommender) -> Self {
        Self {
            config,
            resolver,
            recommender,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn resolver(&self) -> &FilmResolver {
        &self.resolver
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}
