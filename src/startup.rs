//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server,
//! including initialization of the metric registry, the health reporter,
//! and route setup.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::health::HealthReporter;
use crate::metrics::{Metrics, MetricsError};
use crate::routes;
use crate::state::AppState;

/// Fatal startup conditions. Any of these must terminate the process with a
/// non-zero exit code; none of them can occur once the server is serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("failed to initialize metrics: {0}")]
    Metrics(#[from] MetricsError),

    #[error("server error: {0}")]
    Server(String),
}

/// Initializes and runs the application server.
///
/// Builds the metric registry and health reporter, binds to the address
/// specified in the configuration, and serves requests until a shutdown
/// signal arrives. Partial initialization never serves: any failure here
/// propagates before the listener accepts a single connection.
///
/// # Errors
///
/// Returns an error if metric registration fails, if the server fails to
/// bind to the specified address, or on a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), StartupError> {
    let metrics = Metrics::new()?;
    let health = Arc::new(HealthReporter::new());

    let state = AppState { metrics, health };

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

/// Resolves once SIGTERM or Ctrl+C is received.
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
