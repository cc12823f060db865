//! Prometheus metrics for the HTTP API and signal engine.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub evaluations_total: IntCounter,
    pub backtests_total: IntCounter,
    pub provider_errors_total: IntCounter,
    pub alerts_sent_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let evaluations_total =
            IntCounter::new("evaluations_total", "Signal evaluations performed")?;
        let backtests_total = IntCounter::new("backtests_total", "Backtest runs performed")?;
        let provider_errors_total =
            IntCounter::new("provider_errors_total", "Market data provider failures")?;
        let alerts_sent_total =
            IntCounter::new("alerts_sent_total", "Watchlist alerts dispatched")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(evaluations_total.clone()))?;
        registry.register(Box::new(backtests_total.clone()))?;
        registry.register(Box::new(provider_errors_total.clone()))?;
        registry.register(Box::new(alerts_sent_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            evaluations_total,
            backtests_total,
            provider_errors_total,
            alerts_sent_total,
        })
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
