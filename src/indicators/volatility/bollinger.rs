//! Bollinger Bands indicator.

use crate::common::math;
use crate::models::candle::Candle;

#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Upper/lower bands: SMA(period) +/- std_dev * population sigma over the
/// same window. `None` until a full window exists.
pub fn bollinger_series(candles: &[Candle], period: usize, std_dev: f64) -> BollingerSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma_series(&closes, period);

    let mut upper = vec![None; candles.len()];
    let mut lower = vec![None; candles.len()];
    for i in 0..candles.len() {
        if let Some(mid) = middle[i] {
            let sigma = math::stddev(&closes[i + 1 - period..=i]);
            upper[i] = Some(mid + std_dev * sigma);
            lower[i] = Some(mid - std_dev * sigma);
        }
    }
    BollingerSeries { upper, lower }
}
