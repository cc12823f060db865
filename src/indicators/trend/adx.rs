//! ADX (Average Directional Index) indicator.

use crate::common::math;
use crate::models::candle::Candle;

/// ADX series aligned with the input candles, Wilder smoothing throughout.
///
/// DX needs `period` true-range/directional-movement deltas, and ADX itself is
/// the Wilder average of `period` DX values, so the first defined entry sits
/// at index `2 * period - 1`.
pub fn adx_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < 2 * period {
        return out;
    }

    let deltas = candles.len() - 1;
    let mut tr = Vec::with_capacity(deltas);
    let mut plus_dm = Vec::with_capacity(deltas);
    let mut minus_dm = Vec::with_capacity(deltas);
    for i in 1..candles.len() {
        tr.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));

        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;
        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    // Wilder-smoothed running sums, seeded with plain sums of the first window.
    let mut sm_tr: f64 = tr[..period].iter().sum();
    let mut sm_plus: f64 = plus_dm[..period].iter().sum();
    let mut sm_minus: f64 = minus_dm[..period].iter().sum();

    let mut dx_values = Vec::with_capacity(deltas - period + 1);
    dx_values.push(dx(sm_plus, sm_minus, sm_tr));
    for i in period..deltas {
        sm_tr = sm_tr - sm_tr / period as f64 + tr[i];
        sm_plus = sm_plus - sm_plus / period as f64 + plus_dm[i];
        sm_minus = sm_minus - sm_minus / period as f64 + minus_dm[i];
        dx_values.push(dx(sm_plus, sm_minus, sm_tr));
    }

    if dx_values.len() < period {
        return out;
    }

    let mut adx: f64 = dx_values[..period].iter().sum::<f64>() / period as f64;
    // dx_values[j] describes bar j + period; the ADX seed covers bars up to
    // index 2 * period - 1.
    out[2 * period - 1] = Some(adx);
    for j in period..dx_values.len() {
        adx = (adx * (period as f64 - 1.0) + dx_values[j]) / period as f64;
        out[j + period] = Some(adx);
    }
    out
}

fn dx(sm_plus: f64, sm_minus: f64, sm_tr: f64) -> f64 {
    if sm_tr == 0.0 {
        return 0.0;
    }
    let plus_di = 100.0 * sm_plus / sm_tr;
    let minus_di = 100.0 * sm_minus / sm_tr;
    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return 0.0;
    }
    100.0 * (plus_di - minus_di).abs() / di_sum
}
