//! EMA (Exponential Moving Average) over candle closes.

use crate::common::math;
use crate::models::candle::Candle;

/// EMA series of closes, `None` during the warm-up window.
pub fn ema_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema_series(&closes, period)
}

/// Rolling SMA series of closes, used as the evaluator's trend reference.
pub fn sma_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::sma_series(&closes, period)
}
