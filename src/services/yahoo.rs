//! Yahoo-style chart history provider.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::candle::Candle;
use crate::services::market_data::{Interval, MarketDataProvider};

pub struct YahooProvider {
    http: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<Quote>,
}

/// Quote arrays run parallel to the timestamp array; individual entries can
/// be null for halted or partial bars.
#[derive(Debug, Deserialize)]
struct Quote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn history(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!(symbol, interval = %interval, "fetching chart history");

        let response = (|| async {
            self.http
                .get(&url)
                .query(&[("interval", interval.code()), ("range", interval.range())])
                .send()
                .await?
                .error_for_status()
        })
        .retry(ExponentialBuilder::default().with_max_times(3))
        .when(|e: &reqwest::Error| {
            e.is_timeout()
                || e.is_connect()
                || e.status().is_some_and(|s| s.is_server_error())
        })
        .await?;

        let payload: ChartResponse = response.json().await?;
        if let Some(error) = payload.chart.error {
            if !error.is_null() {
                return Err(ProviderError::Payload(error.to_string()));
            }
        }

        let result = payload
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| ProviderError::Empty(symbol.to_string()))?;

        let timestamps = result
            .timestamp
            .ok_or_else(|| ProviderError::Empty(symbol.to_string()))?;
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Empty(symbol.to_string()))?;

        let mut candles = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let bar = (
                DateTime::from_timestamp(*ts, 0),
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            );
            // Null entries mark partial bars; skip the whole row.
            if let (Some(timestamp), Some(open), Some(high), Some(low), Some(close), Some(volume)) =
                bar
            {
                candles.push(Candle::new(timestamp, open, high, low, close, volume));
            }
        }

        if candles.is_empty() {
            return Err(ProviderError::Empty(symbol.to_string()));
        }
        Ok(candles)
    }
}
