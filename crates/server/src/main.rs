use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sommelier_core::{
    load_config, load_config_from_env, validate_config, AnthropicClient, Config, FilmResolver,
    Recommender, SanitizedConfig, TmdbClient,
};
use sommelier_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file used when `SOMMELIER_CONFIG` is not set
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env is fine; real environment variables still apply
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Film Sommelier v{}", VERSION);
    if let Ok(path) = dotenv {
        info!("Loaded environment from {:?}", path);
    }

    let config = load()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    let sanitized = SanitizedConfig::from(&config);
    info!(
        tmdb_base_url = %sanitized.tmdb.base_url,
        tmdb_key_configured = sanitized.tmdb.api_key_configured,
        llm_model = %sanitized.llm.model,
        llm_key_configured = sanitized.llm.api_key_configured,
        max_tokens = sanitized.llm.max_tokens,
        "Upstream services"
    );

    // Metadata resolver
    let tmdb = TmdbClient::new(config.tmdb.clone()).context("Failed to create TMDB client")?;
    let resolver = FilmResolver::new(Arc::new(tmdb));
    info!("TMDB client initialized");

    // Recommendation synthesizer
    let llm = AnthropicClient::from_config(&config.llm).context("Failed to create LLM client")?;
    let recommender = Recommender::new(Arc::new(llm)).with_max_tokens(config.llm.max_tokens);
    info!("Anthropic client initialized (model: {})", config.llm.model);

    // Create app state
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, resolver, recommender));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Load configuration from the file named by `SOMMELIER_CONFIG`, or from
/// `config.toml` when present, falling back to the environment alone.
fn load() -> Result<Config> {
    match std::env::var("SOMMELIER_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            load_config(Path::new(DEFAULT_CONFIG_PATH))
                .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG_PATH))
        }
        Err(_) => {
            info!("No config file, using environment only");
            load_config_from_env().context("Failed to load config from environment")
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
