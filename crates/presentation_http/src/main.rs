//! Flashcards HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{FlashcardService, ports::CardRepositoryPort};
use infrastructure::{
    AppConfig, Environment, GeminiFlashcardGenerator, SpeechAdapter, StorageManager,
};
use presentation_http::{routes, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "flashcard_server=debug,presentation_http=debug,application=debug,infrastructure=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let json_logs = loaded.as_ref().is_ok_and(|c| c.server.json_logs());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("Flashcards v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        environment = %config.environment(),
        database = %config.database.redacted_uri(),
        model = %config.inference.default_model,
        "Configuration loaded"
    );

    set_expose_internal_errors(config.environment() == Environment::Development);

    // Storage never fails to start; it falls back to memory instead
    let storage = Arc::new(StorageManager::connect(&config.database).await);
    info!(database = storage.mode().label(), "Card storage ready");

    let generator = Arc::new(GeminiFlashcardGenerator::from_config(
        config.inference.clone(),
    ));
    let speech = Arc::new(
        SpeechAdapter::new(config.speech.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech: {e}"))?,
    );

    let flashcards = Arc::new(FlashcardService::new(storage, generator, speech));
    let state = AppState::new(Arc::clone(&flashcards), config.clone());

    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size_bytes));

    let app = if config.server.cors_enabled {
        app.layer(cors_layer(&config.server.allowed_origins))
    } else {
        app
    };

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if tokio::time::timeout(shutdown_timeout, flashcards.shutdown())
        .await
        .is_err()
    {
        warn!("Timed out closing card storage");
    }

    info!("Server shutdown complete");

    Ok(())
}

/// CORS for the configured origins; `*` or an empty list allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    use axum::http::{HeaderValue, Method};

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
