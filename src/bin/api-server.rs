//! Key Levels API Server
//!
//! Accepts OHLC uploads (JSON or CSV), computes support/resistance levels and
//! serves them back keyed by ticker and timeframe. State is held in memory.

use dotenvy::dotenv;
use keylevels::config::{self, LevelSettings};
use keylevels::core::http::start_server;
use keylevels::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = config::get_port();
    let settings = LevelSettings::from_env();
    let env = config::get_environment();
    info!("Starting Key Levels API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = start_server(port, settings) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    info!("API server stopped");
    Ok(())
}
