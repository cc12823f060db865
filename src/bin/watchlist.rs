//! ChartPulse watchlist scanner.
//!
//! Runs the multi-factor confluence check against the latest daily bar of
//! every watchlist symbol and pushes BUY/SELL hits to the alert webhook.
//! A quiet market sends nothing.

use std::sync::Arc;
use std::time::Duration;

use chartpulse::config::{get_environment, Config};
use chartpulse::core::http::build_provider;
use chartpulse::core::runtime::SignalRuntime;
use chartpulse::logging;
use chartpulse::metrics::Metrics;
use chartpulse::services::alerts::{format_confluence_alert, AlertDispatcher};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env();
    info!("Starting ChartPulse watchlist scanner");
    info!(environment = %get_environment(), "Environment");

    if config.watchlist.is_empty() {
        return Err("WATCHLIST must name at least one symbol".into());
    }

    let metrics = Arc::new(Metrics::new()?);
    let provider = build_provider(&config)?;
    let runtime = Arc::new(SignalRuntime::new(provider, metrics.clone()));

    let dispatcher = match (
        &config.alert_webhook_base,
        &config.alert_bot_token,
        &config.alert_chat_id,
    ) {
        (Some(base), Some(token), Some(chat)) => Some(AlertDispatcher::new(base, token, chat)),
        _ => {
            warn!("Alert webhook not fully configured; hits will only be logged");
            None
        }
    };

    info!(
        symbols = config.watchlist.len(),
        poll_interval_secs = config.poll_interval_secs,
        "Watchlist configured"
    );

    if config.poll_interval_secs == 0 {
        scan(&runtime, &config.watchlist, dispatcher.as_ref(), &metrics).await;
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                scan(&runtime, &config.watchlist, dispatcher.as_ref(), &metrics).await;
            }
            _ = signal::ctrl_c() => {
                info!("Shutting down watchlist scanner...");
                return Ok(());
            }
        }
    }
}

async fn scan(
    runtime: &SignalRuntime,
    watchlist: &[String],
    dispatcher: Option<&AlertDispatcher>,
    metrics: &Metrics,
) {
    for symbol in watchlist {
        match runtime.confluence_scan(symbol).await {
            Ok(Some(hit)) => {
                let message = format_confluence_alert(symbol, &hit);
                info!(symbol, kind = ?hit.kind, price = hit.price, "confluence hit");
                if let Some(dispatcher) = dispatcher {
                    match dispatcher.send(&message).await {
                        Ok(()) => metrics.alerts_sent_total.inc(),
                        Err(e) => error!(error = %e, symbol, "alert delivery failed"),
                    }
                }
            }
            Ok(None) => {
                info!(symbol, "no confluence signal");
            }
            Err(e) => {
                error!(error = %e, symbol, "watchlist fetch failed");
            }
        }
    }
}
