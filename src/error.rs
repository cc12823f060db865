//! Error types shared across the signal engine and data providers.

use thiserror::Error;

/// Errors raised by the pure signal components (evaluator, backtest engine).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    /// A required indicator field is absent or the series is too short.
    /// Callers surface this as a quiet "no data" state, never a crash.
    #[error("insufficient data: {0}")]
    InsufficientData(&'static str),
}

/// Errors raised by market-data providers and the alert webhook.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected payload: {0}")]
    Payload(String),

    #[error("no data returned for symbol {0}")]
    Empty(String),

    #[error("interval {0} not supported by this provider")]
    UnsupportedInterval(String),
}
