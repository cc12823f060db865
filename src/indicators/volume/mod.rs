pub mod vwap;
