//! Signal runtime: wires the data provider, indicator enrichment, and the
//! pure signal components into request-sized operations.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::backtest::engine::{confluence_signal, BacktestEngine};
use crate::error::ProviderError;
use crate::indicators;
use crate::metrics::Metrics;
use crate::models::candle::Candle;
use crate::models::signal::{Insight, Signal};
use crate::models::strategy::StrategyKind;
use crate::services::market_data::{Interval, MarketDataProvider};
use crate::signals::evaluator::SignalEvaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    /// Not enough history for the requested computation. A quiet market or a
    /// short series is a quiet report, never an error response.
    NoData,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub symbol: String,
    pub interval: String,
    pub status: ReportStatus,
    pub bars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<Insight>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub interval: String,
    pub strategy: StrategyKind,
    pub status: ReportStatus,
    pub signals: Vec<Signal>,
}

pub struct SignalRuntime {
    provider: Arc<dyn MarketDataProvider>,
    metrics: Arc<Metrics>,
}

impl SignalRuntime {
    pub fn new(provider: Arc<dyn MarketDataProvider>, metrics: Arc<Metrics>) -> Self {
        Self { provider, metrics }
    }

    async fn fetch(&self, symbol: &str, interval: Interval) -> Result<Vec<Candle>, ProviderError> {
        match self.provider.history(symbol, interval).await {
            Ok(candles) => Ok(candles),
            Err(e) => {
                self.metrics.provider_errors_total.inc();
                Err(e)
            }
        }
    }

    /// Fetch, enrich, and evaluate the latest bar for a symbol.
    pub async fn insight(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<InsightReport, ProviderError> {
        let candles = self.fetch(symbol, interval).await?;
        let rows = indicators::enrich(&candles);
        self.metrics.evaluations_total.inc();

        let evaluated: Option<Insight> = match (rows.last(), indicators::trend_reference(&candles))
        {
            (Some(latest), Some(trend_reference)) => {
                match SignalEvaluator::evaluate(latest, trend_reference) {
                    Ok(insight) => Some(insight),
                    Err(e) => {
                        debug!(symbol, error = %e, "evaluation skipped");
                        None
                    }
                }
            }
            _ => None,
        };

        let status = if evaluated.is_some() {
            ReportStatus::Ok
        } else {
            ReportStatus::NoData
        };
        Ok(InsightReport {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            status,
            bars: candles.len(),
            latest_close: candles.last().map(|c| c.close),
            insight: evaluated,
        })
    }

    /// Fetch, enrich, and replay a strategy over a symbol's history.
    pub async fn backtest(
        &self,
        symbol: &str,
        interval: Interval,
        strategy: StrategyKind,
    ) -> Result<BacktestReport, ProviderError> {
        let candles = self.fetch(symbol, interval).await?;
        let rows = indicators::enrich(&candles);
        self.metrics.backtests_total.inc();

        let (status, signals) = match BacktestEngine::run(&rows, strategy) {
            Ok(signals) => (ReportStatus::Ok, signals),
            Err(e) => {
                warn!(symbol, strategy = %strategy, error = %e, "backtest returned no data");
                (ReportStatus::NoData, Vec::new())
            }
        };

        Ok(BacktestReport {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            strategy,
            status,
            signals,
        })
    }

    /// Confluence check at the latest daily bar, used by the watchlist
    /// scanner. Missing fields fail closed into `None`.
    pub async fn confluence_scan(&self, symbol: &str) -> Result<Option<Signal>, ProviderError> {
        let candles = self.fetch(symbol, Interval::Daily).await?;
        let rows = indicators::enrich(&candles);
        self.metrics.evaluations_total.inc();

        Ok(rows.last().and_then(|latest| {
            confluence_signal(latest).map(|kind| Signal {
                timestamp: latest.timestamp,
                kind,
                price: latest.close,
            })
        }))
    }
}
