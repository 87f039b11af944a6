//! Dropshare Server — minimal file sharing service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use dropshare_api::state::AppState;
use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;
use dropshare_core::traits::storage::FileStore;
use dropshare_service::file::FileService;
use dropshare_service::share::sweep::spawn_sweeper;
use dropshare_service::share::{ShareLinkManager, ShareService};
use dropshare_storage::LocalFileStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("DROPSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Dropshare v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Initialize storage ───────────────────────────────
    let store: Arc<dyn FileStore> =
        Arc::new(LocalFileStore::new(&config.storage.upload_root).await?);
    tracing::info!("Upload root ready at {}", config.storage.upload_root);

    // ── Step 2: Initialize services ──────────────────────────────
    let manager = Arc::new(ShareLinkManager::new(config.share.link_ttl_days));
    let file_service = Arc::new(FileService::new(Arc::clone(&store), config.storage.clone()));
    let share_service = Arc::new(ShareService::new(Arc::clone(&manager), Arc::clone(&store)));

    // ── Step 3: Shutdown channel + expired-link sweeper ──────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = if config.share.sweep_enabled {
        let interval = std::time::Duration::from_secs(config.share.sweep_interval_seconds);
        tracing::info!(interval_seconds = config.share.sweep_interval_seconds, "Expired-link sweeper started");
        Some(spawn_sweeper(Arc::clone(&manager), interval, shutdown_rx))
    } else {
        tracing::info!("Expired-link sweeper disabled");
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        file_service,
        share_service,
    };

    let app = dropshare_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Dropshare server listening on {addr}");

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), handle).await;
    }

    tracing::info!("Dropshare server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
