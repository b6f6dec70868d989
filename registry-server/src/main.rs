//! Registry Server - version, cluster health and readiness endpoints
//!
//! # Usage
//!
//! ```bash
//! # Defaults to 0.0.0.0:30100
//! cargo run --bin registry-server
//!
//! # JSON logs, custom port
//! LOG_JSON=true PORT=8080 cargo run --bin registry-server
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use registry_server::checks::{BuildVersionSource, LocalClusterHealth, ShutdownReadiness};
use registry_server::{build_router, AppState, Config, RegistryEndpoint};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;

    // Setup logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting Registry Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    let shutdown = CancellationToken::new();

    let endpoint = RegistryEndpoint::new(
        Arc::new(BuildVersionSource),
        Arc::new(LocalClusterHealth::new(
            config.hostname.clone(),
            config.advertised_endpoint(),
        )),
        Arc::new(ShutdownReadiness::new(shutdown.clone())),
    );

    let state = AppState::new(endpoint)
        .with_shutdown(shutdown.clone())
        .with_request_timeout(config.request_timeout);

    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }

    // readiness reports unavailable from here on
    shutdown.cancel();
}
