//! Market data provider interface.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::candle::Candle;

/// Bar interval, with the lookback range each maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    /// Interval code in the history API's vocabulary.
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }

    /// Lookback range paired with each interval.
    pub fn range(&self) -> &'static str {
        match self {
            Interval::Daily => "3mo",
            Interval::Weekly => "6mo",
            Interval::Monthly => "1y",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInterval(pub String);

impl fmt::Display for UnknownInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown interval: {}", self.0)
    }
}

impl std::error::Error for UnknownInterval {}

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Interval::Daily),
            "1wk" => Ok(Interval::Weekly),
            "1mo" => Ok(Interval::Monthly),
            other => Err(UnknownInterval(other.to_string())),
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Historical candles for a symbol, ascending by timestamp.
    async fn history(&self, symbol: &str, interval: Interval)
        -> Result<Vec<Candle>, ProviderError>;
}
