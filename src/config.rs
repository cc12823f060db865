//! Environment-based configuration.

use std::env;

/// Deployment environment, used to pick the log format.
pub fn get_environment() -> String {
    env::var("CHARTPULSE_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    AlphaVantage,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub provider: ProviderKind,
    pub yahoo_base_url: String,
    pub alpha_vantage_base_url: String,
    pub alpha_vantage_api_key: Option<String>,
    /// Symbols scanned by the watchlist binary.
    pub watchlist: Vec<String>,
    /// Seconds between watchlist scans; 0 means a single pass.
    pub poll_interval_secs: u64,
    pub alert_webhook_base: Option<String>,
    pub alert_bot_token: Option<String>,
    pub alert_chat_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let provider = match env::var("MARKET_DATA_PROVIDER").as_deref() {
            Ok("alpha_vantage") => ProviderKind::AlphaVantage,
            _ => ProviderKind::Yahoo,
        };

        let watchlist = env::var("WATCHLIST")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            provider,
            yahoo_base_url: env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string()),
            alpha_vantage_base_url: env::var("ALPHA_VANTAGE_BASE_URL")
                .unwrap_or_else(|_| "https://www.alphavantage.co".to_string()),
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY").ok(),
            watchlist,
            poll_interval_secs: env::var("POLL_INTERVAL_SECONDS")
                .ok()
                .and_then(|i| i.parse().ok())
                .unwrap_or(0),
            alert_webhook_base: env::var("ALERT_WEBHOOK_BASE").ok(),
            alert_bot_token: env::var("ALERT_BOT_TOKEN").ok(),
            alert_chat_id: env::var("ALERT_CHAT_ID").ok(),
        }
    }
}
