//! Application entry point.
//!
//! Loads configuration, initializes logging, and runs the HTTP server.
//! Startup failures (bad config, bind failure, duplicate metric
//! registration) terminate the process with a non-zero exit code;
//! a graceful shutdown exits with 0.

use std::sync::Arc;

use vitals::config;
use vitals::startup;
use vitals::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    // `--config-schema` prints the configuration JSON schema and exits.
    if std::env::args().any(|arg| arg == "--config-schema") {
        config::print_schema();
        return;
    }

    let config = Arc::new(config::load_config());
    init_logging(&config.logging);

    if let Err(err) = startup::run(config).await {
        tracing::error!(error = %err, "Fatal startup error");
        std::process::exit(1);
    }
}
