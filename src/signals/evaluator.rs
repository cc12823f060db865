//! Signal evaluator: classify the latest bar into a textual recommendation.

use crate::error::SignalError;
use crate::models::indicators::IndicatorRow;
use crate::models::signal::{Insight, MacdState, MomentumState, Recommendation, Trend};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

pub struct SignalEvaluator;

impl SignalEvaluator {
    /// Evaluate the latest indicator row against a trend reference (typically
    /// the 20-bar SMA of closes).
    ///
    /// Four classifications are derived independently:
    /// - trend: bullish iff close is strictly above the reference (a close
    ///   exactly on the reference counts as bearish);
    /// - momentum: overbought above 70, oversold below 30, the thresholds
    ///   themselves classify as neutral;
    /// - MACD state: above-signal iff macd is strictly above its signal line;
    /// - recommendation: BUY iff oversold and macd above signal, SELL iff
    ///   overbought and macd below signal, otherwise NEUTRAL. Trend is
    ///   reported alongside but never gates the recommendation.
    pub fn evaluate(latest: &IndicatorRow, trend_reference: f64) -> Result<Insight, SignalError> {
        let rsi = latest
            .rsi
            .ok_or(SignalError::InsufficientData("rsi not yet computable"))?;
        let macd = latest
            .macd
            .ok_or(SignalError::InsufficientData("macd not yet computable"))?;
        let macd_signal = latest.macd_signal.ok_or(SignalError::InsufficientData(
            "macd signal line not yet computable",
        ))?;

        let trend = if latest.close > trend_reference {
            Trend::Bullish
        } else {
            Trend::Bearish
        };

        let momentum = if rsi > RSI_OVERBOUGHT {
            MomentumState::Overbought
        } else if rsi < RSI_OVERSOLD {
            MomentumState::Oversold
        } else {
            MomentumState::Neutral
        };

        let macd_state = if macd > macd_signal {
            MacdState::AboveSignal
        } else {
            MacdState::BelowSignal
        };

        let recommendation = if rsi < RSI_OVERSOLD && macd > macd_signal {
            Recommendation::Buy
        } else if rsi > RSI_OVERBOUGHT && macd < macd_signal {
            Recommendation::Sell
        } else {
            Recommendation::Neutral
        };

        let commentary = build_commentary(trend, momentum, macd_state, recommendation, rsi);

        Ok(Insight {
            trend,
            momentum,
            macd_state,
            recommendation,
            commentary,
        })
    }
}

fn build_commentary(
    trend: Trend,
    momentum: MomentumState,
    macd_state: MacdState,
    recommendation: Recommendation,
    rsi: f64,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);
    lines.push(match trend {
        Trend::Bullish => "Price is trading above the trend reference (bullish).".to_string(),
        Trend::Bearish => "Price is trading below the trend reference (bearish).".to_string(),
    });
    lines.push(match momentum {
        MomentumState::Overbought => format!("RSI is {:.1} (overbought).", rsi),
        MomentumState::Oversold => format!("RSI is {:.1} (oversold).", rsi),
        MomentumState::Neutral => format!("RSI is {:.1} (neutral).", rsi),
    });
    lines.push(match macd_state {
        MacdState::AboveSignal => "MACD is above its signal line (bullish momentum).".to_string(),
        MacdState::BelowSignal => "MACD is below its signal line (bearish momentum).".to_string(),
    });
    lines.push(match recommendation {
        Recommendation::Buy => "Signal: BUY".to_string(),
        Recommendation::Sell => "Signal: SELL".to_string(),
        Recommendation::Neutral => "Signal: NEUTRAL".to_string(),
    });
    lines
}
