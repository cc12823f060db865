pub mod supertrend;
