//! VWAP (Volume-Weighted Average Price) indicator.

use crate::models::candle::Candle;

/// Cumulative VWAP over the fetched window:
/// sum(typical_price * volume) / sum(volume), running from the first bar.
/// Entries stay `None` while the cumulative volume is zero.
pub fn vwap_series(candles: &[Candle]) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    let mut pv_sum = 0.0;
    let mut volume_sum = 0.0;
    for (i, candle) in candles.iter().enumerate() {
        pv_sum += candle.typical_price() * candle.volume;
        volume_sum += candle.volume;
        if volume_sum > 0.0 {
            out[i] = Some(pv_sum / volume_sum);
        }
    }
    out
}
