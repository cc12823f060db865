//! Unit tests for indicator enrichment

use chartpulse::indicators::{enrich, trend_reference};
use chartpulse::models::candle::Candle;
use chrono::{TimeZone, Utc};

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap();
            Candle::new(ts, close, close + 1.0, close - 1.0, close, 1_000.0)
        })
        .collect()
}

#[test]
fn rows_align_with_candles() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let candles = candles_from_closes(&closes);
    let rows = enrich(&candles);
    assert_eq!(rows.len(), candles.len());
    for (row, candle) in rows.iter().zip(&candles) {
        assert_eq!(row.timestamp, candle.timestamp);
        assert_eq!(row.close, candle.close);
    }
}

#[test]
fn early_rows_leave_fields_undefined_not_zero() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let rows = enrich(&candles_from_closes(&closes));

    let first = &rows[0];
    assert!(first.rsi.is_none());
    assert!(first.macd.is_none());
    assert!(first.macd_signal.is_none());
    assert!(first.ema_fast.is_none());
    assert!(first.ema_slow.is_none());
    assert!(first.bb_upper.is_none());
    assert!(first.adx.is_none());
    assert!(first.supertrend.is_none());
}

#[test]
fn late_rows_have_every_field() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let rows = enrich(&candles_from_closes(&closes));

    let last = rows.last().unwrap();
    assert!(last.rsi.is_some());
    assert!(last.macd.is_some());
    assert!(last.macd_signal.is_some());
    assert!(last.ema_fast.is_some());
    assert!(last.ema_slow.is_some());
    assert!(last.bb_upper.is_some());
    assert!(last.bb_lower.is_some());
    assert!(last.adx.is_some());
    assert!(last.vwap.is_some());
    assert!(last.supertrend.is_some());
}

#[test]
fn trend_reference_is_the_20_bar_close_average() {
    let closes: Vec<f64> = (1..=25).map(|i| i as f64).collect();
    let candles = candles_from_closes(&closes);
    // Mean of 6..=25.
    assert_eq!(trend_reference(&candles), Some(15.5));
    assert_eq!(trend_reference(&candles[..10]), None);
}
