use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

use upload_gateway::{config::AppConfig, routes::create_router, storage::S3Store, AppState};

const SERVICE_NAME: &str = "upload-gateway";

// Graceful shutdown handler
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    shared::observability::init_logging(config.logging.to_log_config(SERVICE_NAME)?)
        .context("Failed to initialize logging")?;

    config.validate().context("Invalid configuration")?;

    info!("Starting Upload Gateway v{}", env!("CARGO_PKG_VERSION"));

    let store = S3Store::from_config(&config.storage).await;
    info!(bucket = %store.bucket(), "S3 client initialized successfully");

    let addr = config.server.bind_address();
    let state = AppState::new(Arc::new(store), config);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Upload Gateway listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Upload Gateway shut down gracefully");
    Ok(())
}
