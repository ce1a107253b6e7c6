//! Marketplace API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p souq-api
//! ```
//!
//! Configuration is loaded from environment variables or a .env file.

use std::process::ExitCode;

use souq_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if !try_init_tracing() {
        eprintln!("Warning: tracing subscriber was already initialized");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting marketplace API"
    );

    if let Err(e) = souq_api::run(config).await {
        error!(error = %e, "Server exited with error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
