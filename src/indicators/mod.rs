//! Technical indicator calculations over candle series.
//!
//! Every series function returns a `Vec<Option<f64>>` aligned with its input:
//! `None` marks bars inside the warm-up window where the value is not yet
//! computable. `enrich` zips all default-parameter series into
//! [`IndicatorRow`]s for the signal engine.

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod volume;

use crate::models::candle::Candle;
use crate::models::indicators::IndicatorRow;

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const EMA_FAST_PERIOD: usize = 20;
pub const EMA_SLOW_PERIOD: usize = 50;
pub const TREND_SMA_PERIOD: usize = 20;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;
pub const ADX_PERIOD: usize = 14;
pub const SUPERTREND_PERIOD: usize = 10;
pub const SUPERTREND_MULTIPLIER: f64 = 3.0;

/// Augment a candle series with all indicators at their default parameters.
pub fn enrich(candles: &[Candle]) -> Vec<IndicatorRow> {
    let rsi = momentum::rsi::rsi_series(candles, RSI_PERIOD);
    let macd = momentum::macd::macd_series(candles, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let ema_fast = trend::ema::ema_series(candles, EMA_FAST_PERIOD);
    let ema_slow = trend::ema::ema_series(candles, EMA_SLOW_PERIOD);
    let bollinger =
        volatility::bollinger::bollinger_series(candles, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);
    let adx = trend::adx::adx_series(candles, ADX_PERIOD);
    let vwap = volume::vwap::vwap_series(candles);
    let supertrend =
        structure::supertrend::supertrend_series(candles, SUPERTREND_PERIOD, SUPERTREND_MULTIPLIER);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let mut row = IndicatorRow::from_candle(candle);
            row.rsi = rsi[i];
            row.macd = macd.macd[i];
            row.macd_signal = macd.signal[i];
            row.ema_fast = ema_fast[i];
            row.ema_slow = ema_slow[i];
            row.bb_upper = bollinger.upper[i];
            row.bb_lower = bollinger.lower[i];
            row.adx = adx[i];
            row.vwap = vwap[i];
            row.supertrend = supertrend[i];
            row
        })
        .collect()
}

/// Trend reference for the evaluator: rolling SMA of closes over the last
/// `TREND_SMA_PERIOD` bars, `None` when the series is shorter than that.
pub fn trend_reference(candles: &[Candle]) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    crate::common::math::sma(&closes, TREND_SMA_PERIOD)
}
