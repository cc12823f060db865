pub mod candle;
pub mod indicators;
pub mod signal;
pub mod strategy;
