//! ChartPulse — stock signal tracker.
//!
//! Fetches OHLCV history from a market-data provider, enriches it with
//! standard technical indicators, classifies the latest bar into a textual
//! recommendation, and replays rule-based strategies over the history.

pub mod backtest;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
