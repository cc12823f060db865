//! Alpha-Vantage-style daily time-series provider.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::candle::Candle;
use crate::services::market_data::{Interval, MarketDataProvider};

pub struct AlphaVantageProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    /// BTreeMap keys are ISO dates, so iteration order is already ascending.
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    async fn history(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, ProviderError> {
        // The quote API only serves daily bars.
        if interval != Interval::Daily {
            return Err(ProviderError::UnsupportedInterval(interval.to_string()));
        }

        let url = format!("{}/query", self.base_url);
        debug!(symbol, "fetching daily time series");

        let response = (|| async {
            self.http
                .get(&url)
                .query(&[
                    ("function", "TIME_SERIES_DAILY"),
                    ("symbol", symbol),
                    ("outputsize", "compact"),
                    ("apikey", self.api_key.as_str()),
                ])
                .send()
                .await?
                .error_for_status()
        })
        .retry(ExponentialBuilder::default().with_max_times(3))
        .when(|e: &reqwest::Error| {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        })
        .await?;

        let payload: DailyResponse = response.json().await?;
        if let Some(error) = payload.error {
            return Err(ProviderError::Payload(error));
        }
        if let Some(note) = payload.note {
            // Rate-limit notes come back as 200s with no series attached.
            return Err(ProviderError::Payload(note));
        }

        let series = payload
            .series
            .ok_or_else(|| ProviderError::Empty(symbol.to_string()))?;

        let mut candles = Vec::with_capacity(series.len());
        for (date, bar) in series {
            let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| ProviderError::Payload(format!("bad date {date}: {e}")))?;
            let timestamp = day
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| ProviderError::Payload(format!("bad date {date}")))?
                .and_utc();
            candles.push(Candle::new(
                timestamp,
                parse_field(&bar.open, "open")?,
                parse_field(&bar.high, "high")?,
                parse_field(&bar.low, "low")?,
                parse_field(&bar.close, "close")?,
                parse_field(&bar.volume, "volume")?,
            ));
        }

        if candles.is_empty() {
            return Err(ProviderError::Empty(symbol.to_string()));
        }
        Ok(candles)
    }
}

fn parse_field(raw: &str, name: &str) -> Result<f64, ProviderError> {
    raw.parse()
        .map_err(|e| ProviderError::Payload(format!("bad {name} value {raw:?}: {e}")))
}
