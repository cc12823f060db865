//! Messaging-bot webhook alert delivery for the watchlist scanner.

use std::time::Duration;

use serde_json::json;
use tracing::info;

use crate::error::ProviderError;
use crate::models::signal::{Signal, SignalKind};

pub struct AlertDispatcher {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl AlertDispatcher {
    pub fn new(
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Push a plain-text message through the bot webhook.
    pub async fn send(&self, text: &str) -> Result<(), ProviderError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        self.http
            .post(&url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?
            .error_for_status()?;
        info!("alert delivered");
        Ok(())
    }
}

/// Message body for a confluence hit on a watchlist symbol.
pub fn format_confluence_alert(symbol: &str, signal: &Signal) -> String {
    let action = match signal.kind {
        SignalKind::Buy => "BUY",
        SignalKind::Sell => "SELL",
    };
    format!(
        "ChartPulse confluence alert: {action} {symbol} at {:.2} ({})",
        signal.price,
        signal.timestamp.format("%Y-%m-%d")
    )
}
