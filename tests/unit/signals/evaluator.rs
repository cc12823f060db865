//! Unit tests for the signal evaluator

use chartpulse::error::SignalError;
use chartpulse::models::candle::Candle;
use chartpulse::models::indicators::IndicatorRow;
use chartpulse::models::signal::{MacdState, MomentumState, Recommendation, Trend};
use chartpulse::signals::evaluator::SignalEvaluator;
use chrono::{TimeZone, Utc};

fn row(close: f64, rsi: Option<f64>, macd: Option<f64>, macd_signal: Option<f64>) -> IndicatorRow {
    let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let candle = Candle::new(ts, close, close + 1.0, close - 1.0, close, 1_000.0);
    let mut row = IndicatorRow::from_candle(&candle);
    row.rsi = rsi;
    row.macd = macd;
    row.macd_signal = macd_signal;
    row
}

#[test]
fn missing_rsi_is_insufficient_data() {
    let latest = row(100.0, None, Some(1.0), Some(0.5));
    let err = SignalEvaluator::evaluate(&latest, 99.0).unwrap_err();
    assert!(matches!(err, SignalError::InsufficientData(_)));
}

#[test]
fn missing_macd_signal_is_insufficient_data() {
    let latest = row(100.0, Some(50.0), Some(1.0), None);
    assert!(SignalEvaluator::evaluate(&latest, 99.0).is_err());
}

#[test]
fn close_above_reference_is_bullish() {
    let latest = row(100.0, Some(50.0), Some(1.0), Some(0.5));
    let insight = SignalEvaluator::evaluate(&latest, 99.0).unwrap();
    assert_eq!(insight.trend, Trend::Bullish);
}

#[test]
fn close_equal_to_reference_is_bearish() {
    // Strict inequality: sitting exactly on the reference is not bullish.
    let latest = row(100.0, Some(50.0), Some(1.0), Some(0.5));
    let insight = SignalEvaluator::evaluate(&latest, 100.0).unwrap();
    assert_eq!(insight.trend, Trend::Bearish);
}

#[test]
fn rsi_band_boundaries_are_neutral() {
    for rsi in [30.0, 70.0] {
        let latest = row(100.0, Some(rsi), Some(1.0), Some(0.5));
        let insight = SignalEvaluator::evaluate(&latest, 99.0).unwrap();
        assert_eq!(insight.momentum, MomentumState::Neutral);
    }
}

#[test]
fn rsi_extremes_classify_as_expected() {
    let overbought = row(100.0, Some(70.1), Some(1.0), Some(0.5));
    assert_eq!(
        SignalEvaluator::evaluate(&overbought, 99.0).unwrap().momentum,
        MomentumState::Overbought
    );

    let oversold = row(100.0, Some(29.9), Some(1.0), Some(0.5));
    assert_eq!(
        SignalEvaluator::evaluate(&oversold, 99.0).unwrap().momentum,
        MomentumState::Oversold
    );
}

#[test]
fn macd_equality_counts_as_below_signal() {
    let latest = row(100.0, Some(50.0), Some(0.5), Some(0.5));
    let insight = SignalEvaluator::evaluate(&latest, 99.0).unwrap();
    assert_eq!(insight.macd_state, MacdState::BelowSignal);
}

#[test]
fn oversold_with_bullish_macd_is_a_buy() {
    let latest = row(100.0, Some(25.0), Some(1.0), Some(0.5));
    let insight = SignalEvaluator::evaluate(&latest, 101.0).unwrap();
    // Bearish trend does not gate the recommendation.
    assert_eq!(insight.trend, Trend::Bearish);
    assert_eq!(insight.recommendation, Recommendation::Buy);
}

#[test]
fn overbought_with_bearish_macd_is_a_sell() {
    let latest = row(100.0, Some(75.0), Some(-1.0), Some(0.5));
    let insight = SignalEvaluator::evaluate(&latest, 99.0).unwrap();
    assert_eq!(insight.recommendation, Recommendation::Sell);
}

#[test]
fn oversold_with_bearish_macd_stays_neutral() {
    let latest = row(100.0, Some(25.0), Some(-1.0), Some(0.5));
    let insight = SignalEvaluator::evaluate(&latest, 99.0).unwrap();
    assert_eq!(insight.recommendation, Recommendation::Neutral);
}

#[test]
fn buy_and_sell_are_mutually_exclusive() {
    // The two predicates require opposite RSI bands, so no row can be both.
    for rsi in [10.0, 30.0, 50.0, 70.0, 90.0] {
        for (macd, signal) in [(1.0, 0.5), (0.5, 1.0), (0.5, 0.5)] {
            let latest = row(100.0, Some(rsi), Some(macd), Some(signal));
            let insight = SignalEvaluator::evaluate(&latest, 99.0).unwrap();
            let buy = insight.recommendation == Recommendation::Buy;
            let sell = insight.recommendation == Recommendation::Sell;
            assert!(!(buy && sell));
        }
    }
}

#[test]
fn commentary_covers_all_four_classifications() {
    let latest = row(100.0, Some(25.0), Some(1.0), Some(0.5));
    let insight = SignalEvaluator::evaluate(&latest, 99.0).unwrap();
    assert_eq!(insight.commentary.len(), 4);
    assert!(insight.commentary[1].contains("25.0"));
    assert!(insight.commentary[3].contains("BUY"));
}
