//! MACD (Moving Average Convergence Divergence) indicator.

use crate::common::math;
use crate::models::candle::Candle;

/// MACD line and signal line, each aligned with the input candles.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// MACD = EMA(fast) - EMA(slow); Signal = EMA(signal_period) of MACD.
///
/// The MACD line is defined once the slow EMA is seeded (index `slow - 1`);
/// the signal line needs `signal_period` MACD values on top of that.
pub fn macd_series(
    candles: &[Candle],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast_ema = math::ema_series(&closes, fast);
    let slow_ema = math::ema_series(&closes, slow);

    let mut macd = vec![None; candles.len()];
    let mut macd_values = Vec::new();
    let mut first_defined = None;
    for i in 0..candles.len() {
        if let (Some(f), Some(s)) = (fast_ema[i], slow_ema[i]) {
            macd[i] = Some(f - s);
            if first_defined.is_none() {
                first_defined = Some(i);
            }
            macd_values.push(f - s);
        }
    }

    let mut signal = vec![None; candles.len()];
    if let Some(offset) = first_defined {
        let signal_values = math::ema_series(&macd_values, signal_period);
        for (j, value) in signal_values.into_iter().enumerate() {
            signal[offset + j] = value;
        }
    }

    MacdSeries { macd, signal }
}
