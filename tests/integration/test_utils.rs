//! Test utilities shared by the integration suites.

use std::sync::Arc;
use std::time::Instant;

use axum_test::TestServer;
use chartpulse::core::http::{create_router, AppState, HealthStatus};
use chartpulse::core::runtime::SignalRuntime;
use chartpulse::metrics::Metrics;
use chartpulse::services::yahoo::YahooProvider;
use tokio::sync::RwLock;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// HTTP server wired to a mocked chart-history API.
#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub market_data: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let market_data = MockServer::start().await;

        let provider = Arc::new(YahooProvider::with_client(
            market_data.uri(),
            reqwest::Client::new(),
        ));
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let runtime = Arc::new(SignalRuntime::new(provider, metrics.clone()));

        let state = AppState {
            runtime,
            metrics: metrics.clone(),
            health: Arc::new(RwLock::new(HealthStatus::default())),
            start_time: Arc::new(Instant::now()),
        };

        let server = TestServer::new(create_router(state)).expect("start test server");
        Self {
            server,
            metrics,
            market_data,
        }
    }
}

/// Chart-history payload for `symbol` with one daily bar per close.
pub fn chart_payload(closes: &[f64]) -> serde_json::Value {
    let timestamps: Vec<i64> = (0..closes.len())
        .map(|i| 1_700_000_000 + i as i64 * 86_400)
        .collect();
    let opens: Vec<f64> = closes.to_vec();
    let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
    let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
    let volumes: Vec<f64> = vec![1_000.0; closes.len()];

    serde_json::json!({
        "chart": {
            "result": [{
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": opens,
                        "high": highs,
                        "low": lows,
                        "close": closes,
                        "volume": volumes
                    }]
                }
            }],
            "error": null
        }
    })
}

#[allow(dead_code)]
pub async fn mock_chart_history(server: &MockServer, symbol: &str, closes: &[f64]) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{symbol}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_payload(closes)))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mock_chart_failure(server: &MockServer, symbol: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{symbol}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
