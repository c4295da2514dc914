use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{films, handlers, middleware::metrics_middleware, recommendations};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Film lookup
        .route("/films/search", get(films::search_film))
        .route("/films/search-query", get(films::search_query))
        .route("/films/search-multiple", post(films::search_multiple))
        // Recommendations
        .route("/recommendations", post(recommendations::recommend))
        .with_state(state);

    Router::new()
        .route("/", get(handlers::root))
        .route("/metrics", get(handlers::metrics))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
