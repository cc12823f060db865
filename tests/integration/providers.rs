//! Integration tests for market-data provider payload parsing.

#[path = "test_utils.rs"]
mod test_utils;

use chartpulse::error::ProviderError;
use chartpulse::services::alpha_vantage::AlphaVantageProvider;
use chartpulse::services::market_data::{Interval, MarketDataProvider};
use chartpulse::services::yahoo::YahooProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn yahoo_provider_skips_null_rows() {
    let server = MockServer::start().await;
    let payload = serde_json::json!({
        "chart": {
            "result": [{
                "timestamp": [1_700_000_000i64, 1_700_086_400i64, 1_700_172_800i64],
                "indicators": {
                    "quote": [{
                        "open": [100.0, null, 102.0],
                        "high": [101.0, 102.0, 103.0],
                        "low": [99.0, 100.0, 101.0],
                        "close": [100.5, 101.5, 102.5],
                        "volume": [1000.0, 1100.0, 1200.0]
                    }]
                }
            }],
            "error": null
        }
    });
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/RELIANCE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let provider = YahooProvider::with_client(server.uri(), reqwest::Client::new());
    let candles = provider.history("RELIANCE", Interval::Daily).await.unwrap();

    // The bar with a null open is dropped whole.
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, 100.5);
    assert_eq!(candles[1].close, 102.5);
    assert!(candles[0].timestamp < candles[1].timestamp);
}

#[tokio::test]
async fn yahoo_provider_sends_interval_and_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS"))
        .and(query_param("interval", "1wk"))
        .and(query_param("range", "6mo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_utils::chart_payload(&[100.0])))
        .mount(&server)
        .await;

    let provider = YahooProvider::with_client(server.uri(), reqwest::Client::new());
    let candles = provider.history("TCS", Interval::Weekly).await.unwrap();
    assert_eq!(candles.len(), 1);
}

#[tokio::test]
async fn yahoo_provider_reports_empty_results() {
    let server = MockServer::start().await;
    let payload = serde_json::json!({ "chart": { "result": [], "error": null } });
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let provider = YahooProvider::with_client(server.uri(), reqwest::Client::new());
    let err = provider.history("NOPE", Interval::Daily).await.unwrap_err();
    assert!(matches!(err, ProviderError::Empty(_)));
}

#[tokio::test]
async fn alpha_vantage_provider_sorts_ascending() {
    let server = MockServer::start().await;
    let payload = serde_json::json!({
        "Time Series (Daily)": {
            "2024-01-03": {
                "1. open": "102.0", "2. high": "103.0", "3. low": "101.0",
                "4. close": "102.5", "5. volume": "1200"
            },
            "2024-01-02": {
                "1. open": "100.0", "2. high": "101.0", "3. low": "99.0",
                "4. close": "100.5", "5. volume": "1000"
            }
        }
    });
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "TIME_SERIES_DAILY"))
        .and(query_param("symbol", "IBM"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let provider = AlphaVantageProvider::new(server.uri(), "demo");
    let candles = provider.history("IBM", Interval::Daily).await.unwrap();

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, 100.5);
    assert_eq!(candles[1].close, 102.5);
    assert!(candles[0].timestamp < candles[1].timestamp);
    assert_eq!(candles[0].volume, 1000.0);
}

#[tokio::test]
async fn alpha_vantage_surfaces_rate_limit_notes() {
    let server = MockServer::start().await;
    let payload = serde_json::json!({
        "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."
    });
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let provider = AlphaVantageProvider::new(server.uri(), "demo");
    let err = provider.history("IBM", Interval::Daily).await.unwrap_err();
    assert!(matches!(err, ProviderError::Payload(_)));
}

#[tokio::test]
async fn alpha_vantage_rejects_non_daily_intervals_without_a_request() {
    let server = MockServer::start().await;
    let provider = AlphaVantageProvider::new(server.uri(), "demo");
    let err = provider.history("IBM", Interval::Weekly).await.unwrap_err();
    assert!(matches!(err, ProviderError::UnsupportedInterval(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
