//! Shared math helpers for indicator calculations.

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values[values.len() - period..].iter().sum();
    Some(sum / period as f64)
}

/// One EMA step: smooth `value` into `prev` with alpha = 2 / (period + 1).
pub fn ema_from_previous(value: f64, prev: f64, period: usize) -> f64 {
    let alpha = 2.0 / (period as f64 + 1.0);
    prev + alpha * (value - prev)
}

/// Full EMA series aligned with the input. The first `period - 1` entries are
/// `None`; the value at index `period - 1` is the SMA seed, after which the
/// recursion takes over.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..values.len() {
        prev = ema_from_previous(values[i], prev, period);
        out[i] = Some(prev);
    }
    out
}

/// Rolling SMA series aligned with the input; `None` until a full window exists.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut window_sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(window_sum / period as f64);
    for i in period..values.len() {
        window_sum += values[i] - values[i - period];
        out[i] = Some(window_sum / period as f64);
    }
    out
}

/// Population standard deviation of a window.
pub fn stddev(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let mean = window.iter().sum::<f64>() / window.len() as f64;
    let variance = window
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / window.len() as f64;
    variance.sqrt()
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}
