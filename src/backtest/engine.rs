//! Backtest engine: replay a rule-set over an indicator series and collect
//! the discrete trade signals it would have produced.
//!
//! The engine is a pure signal log, not a portfolio simulator: it never
//! tracks positions, so two BUY signals without an intervening SELL are legal
//! output. Signals are appended in bar order, which keeps the output
//! chronological without any sorting.

use crate::error::SignalError;
use crate::models::indicators::IndicatorRow;
use crate::models::signal::{Signal, SignalKind};
use crate::models::strategy::StrategyKind;
use crate::signals::evaluator::{RSI_OVERBOUGHT, RSI_OVERSOLD};

const ADX_TREND_MIN: f64 = 25.0;

pub struct BacktestEngine;

impl BacktestEngine {
    /// Single forward pass from index 1, comparing each bar against its
    /// predecessor (index 0 never emits; there is no prior bar to form a
    /// transition). Bars with a required field undefined fail closed: the
    /// pair is skipped, never treated as zero.
    pub fn run(
        series: &[IndicatorRow],
        strategy: StrategyKind,
    ) -> Result<Vec<Signal>, SignalError> {
        if series.len() < 2 {
            return Err(SignalError::InsufficientData(
                "backtest needs at least 2 bars",
            ));
        }

        // The confluence rule-set is only ever checked at the latest bar.
        if strategy == StrategyKind::MultiFactorConfluence {
            let latest = &series[series.len() - 1];
            return Ok(confluence_signal(latest)
                .map(|kind| emit(latest, kind))
                .into_iter()
                .collect());
        }

        let mut signals = Vec::new();
        for pair in series.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let kind = match strategy {
                StrategyKind::EmaCrossover => ema_crossover(prev, curr),
                StrategyKind::RsiThresholdCross => rsi_threshold_cross(prev, curr),
                StrategyKind::MacdCrossover => macd_crossover(prev, curr),
                StrategyKind::RsiMacdCombined => rsi_macd_combined(curr),
                StrategyKind::MultiFactorConfluence => unreachable!(),
            };
            if let Some(kind) = kind {
                signals.push(emit(curr, kind));
            }
        }
        Ok(signals)
    }
}

fn emit(row: &IndicatorRow, kind: SignalKind) -> Signal {
    Signal {
        timestamp: row.timestamp,
        kind,
        price: row.close,
    }
}

/// Strict crossing detector on the 20/50 EMAs: touching without crossing
/// emits nothing.
fn ema_crossover(prev: &IndicatorRow, curr: &IndicatorRow) -> Option<SignalKind> {
    let (pf, ps) = (prev.ema_fast?, prev.ema_slow?);
    let (cf, cs) = (curr.ema_fast?, curr.ema_slow?);
    if pf <= ps && cf > cs {
        Some(SignalKind::Buy)
    } else if pf >= ps && cf < cs {
        Some(SignalKind::Sell)
    } else {
        None
    }
}

/// Re-entry rule: BUY when RSI crosses back up through 30, SELL when it
/// crosses back down through 70. Deliberately distinct from the evaluator's
/// entry-into-extreme test.
fn rsi_threshold_cross(prev: &IndicatorRow, curr: &IndicatorRow) -> Option<SignalKind> {
    let (pr, cr) = (prev.rsi?, curr.rsi?);
    if pr < RSI_OVERSOLD && cr >= RSI_OVERSOLD {
        Some(SignalKind::Buy)
    } else if pr > RSI_OVERBOUGHT && cr <= RSI_OVERBOUGHT {
        Some(SignalKind::Sell)
    } else {
        None
    }
}

fn macd_crossover(prev: &IndicatorRow, curr: &IndicatorRow) -> Option<SignalKind> {
    let (pm, ps) = (prev.macd?, prev.macd_signal?);
    let (cm, cs) = (curr.macd?, curr.macd_signal?);
    if pm <= ps && cm > cs {
        Some(SignalKind::Buy)
    } else if pm >= ps && cm < cs {
        Some(SignalKind::Sell)
    } else {
        None
    }
}

/// Pure level test on the current bar; may fire on consecutive bars while the
/// condition holds.
fn rsi_macd_combined(curr: &IndicatorRow) -> Option<SignalKind> {
    let rsi = curr.rsi?;
    let macd = curr.macd?;
    let signal = curr.macd_signal?;
    if rsi < RSI_OVERSOLD && macd > signal {
        Some(SignalKind::Buy)
    } else if rsi > RSI_OVERBOUGHT && macd < signal {
        Some(SignalKind::Sell)
    } else {
        None
    }
}

/// All six conditions are mandatory; any undefined field suppresses the
/// signal. ADX > 25 is required in both directions since it measures trend
/// strength irrespective of sign.
pub fn confluence_signal(row: &IndicatorRow) -> Option<SignalKind> {
    let rsi = row.rsi?;
    let macd = row.macd?;
    let signal = row.macd_signal?;
    let bb_lower = row.bb_lower?;
    let bb_upper = row.bb_upper?;
    let vwap = row.vwap?;
    let supertrend = row.supertrend?;
    let adx = row.adx?;

    if adx <= ADX_TREND_MIN {
        return None;
    }

    let buy = rsi < RSI_OVERSOLD
        && macd > signal
        && row.close < bb_lower
        && row.close > vwap
        && row.close > supertrend;
    if buy {
        return Some(SignalKind::Buy);
    }

    let sell = rsi > RSI_OVERBOUGHT
        && macd < signal
        && row.close > bb_upper
        && row.close < vwap
        && row.close < supertrend;
    if sell {
        return Some(SignalKind::Sell);
    }
    None
}
