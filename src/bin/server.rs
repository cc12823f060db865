//! ChartPulse API server.
//!
//! Serves insight and backtest endpoints over HTTP. Stateless; every request
//! fetches fresh history from the configured market-data provider.

use chartpulse::config::{get_environment, Config};
use chartpulse::core::http::start_server;
use chartpulse::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env();
    info!("Starting ChartPulse API server");
    info!(environment = %get_environment(), "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
