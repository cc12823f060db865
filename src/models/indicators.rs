//! Indicator-enriched bar model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candle::Candle;

/// A candle extended with derived indicator values.
///
/// Every derived field is `Option<f64>`: `None` means "not yet computable"
/// (warm-up window not filled), which must never be collapsed to zero or the
/// downstream threshold comparisons become meaningless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_fast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_slow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertrend: Option<f64>,
}

impl IndicatorRow {
    /// A row with all derived fields undefined.
    pub fn from_candle(candle: &Candle) -> Self {
        Self {
            timestamp: candle.timestamp,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            rsi: None,
            macd: None,
            macd_signal: None,
            ema_fast: None,
            ema_slow: None,
            bb_upper: None,
            bb_lower: None,
            adx: None,
            vwap: None,
            supertrend: None,
        }
    }
}
