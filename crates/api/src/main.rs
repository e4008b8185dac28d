use std::net::SocketAddr;
use std::sync::Arc;

use entourage_replicate::api::ReplicateApi;
use entourage_replicate::pipeline::EntouragePipeline;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use entourage_api::config::ServerConfig;
use entourage_api::router::build_app_router;
use entourage_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "entourage_api=debug,entourage_replicate=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Generation pipeline ---
    let pipeline = match &config.generation.api_token {
        Some(token) => {
            let api = ReplicateApi::new(config.generation.api_url.clone(), token.clone());
            tracing::info!(
                api_url = %config.generation.api_url,
                flux_version = %config.generation.flux_version,
                rembg_version = %config.generation.rembg_version,
                "Generation pipeline configured",
            );
            Some(Arc::new(EntouragePipeline::new(
                Arc::new(api),
                config.generation.pipeline_config(),
            )))
        }
        None => {
            tracing::warn!("REPLICATE_API_TOKEN not set, generation endpoint disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        pipeline,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
