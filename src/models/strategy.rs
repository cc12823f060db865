//! Backtest strategy selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of backtest rule-sets. Selecting one of these is the only
/// configuration input to the backtest engine besides the data itself.
///
/// `RsiThresholdCross` (re-entry into neutral territory) and the evaluator's
/// per-bar extreme test are intentionally distinct policies; they must not be
/// unified under one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    EmaCrossover,
    RsiThresholdCross,
    MacdCrossover,
    RsiMacdCombined,
    MultiFactorConfluence,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::EmaCrossover => "ema_crossover",
            StrategyKind::RsiThresholdCross => "rsi_threshold_cross",
            StrategyKind::MacdCrossover => "macd_crossover",
            StrategyKind::RsiMacdCombined => "rsi_macd_combined",
            StrategyKind::MultiFactorConfluence => "multi_factor_confluence",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy: {}", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ema_crossover" => Ok(StrategyKind::EmaCrossover),
            "rsi_threshold_cross" => Ok(StrategyKind::RsiThresholdCross),
            "macd_crossover" => Ok(StrategyKind::MacdCrossover),
            "rsi_macd_combined" => Ok(StrategyKind::RsiMacdCombined),
            "multi_factor_confluence" => Ok(StrategyKind::MultiFactorConfluence),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}
