//! SuperTrend indicator.

use crate::common::math;
use crate::models::candle::Candle;

/// SuperTrend line aligned with the input candles.
///
/// ATR(period) bands around hl2, tightened recursively: the final upper band
/// only ratchets down while price stays below it, the final lower band only
/// ratchets up while price stays above it. The line sits on the lower band in
/// an uptrend and flips to the upper band when price closes through it.
pub fn supertrend_series(candles: &[Candle], period: usize, multiplier: f64) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < period + 1 {
        return out;
    }

    let mut tr = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        tr.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }

    // Wilder ATR, first defined at bar index `period`.
    let mut atr = tr[..period].iter().sum::<f64>() / period as f64;

    let first = period;
    let hl2 = (candles[first].high + candles[first].low) / 2.0;
    let mut final_upper = hl2 + multiplier * atr;
    let mut final_lower = hl2 - multiplier * atr;
    let mut uptrend = candles[first].close > hl2;
    out[first] = Some(if uptrend { final_lower } else { final_upper });

    for i in first + 1..candles.len() {
        atr = (atr * (period as f64 - 1.0) + tr[i - 1]) / period as f64;
        let hl2 = (candles[i].high + candles[i].low) / 2.0;
        let basic_upper = hl2 + multiplier * atr;
        let basic_lower = hl2 - multiplier * atr;

        let upper = if basic_upper < final_upper || candles[i - 1].close > final_upper {
            basic_upper
        } else {
            final_upper
        };
        let lower = if basic_lower > final_lower || candles[i - 1].close < final_lower {
            basic_lower
        } else {
            final_lower
        };

        uptrend = if candles[i].close > upper {
            true
        } else if candles[i].close < lower {
            false
        } else {
            uptrend
        };

        final_upper = upper;
        final_lower = lower;
        out[i] = Some(if uptrend { final_lower } else { final_upper });
    }
    out
}
