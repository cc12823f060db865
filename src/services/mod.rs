pub mod alerts;
pub mod alpha_vantage;
pub mod market_data;
pub mod yahoo;
