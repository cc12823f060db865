//! HTTP endpoint server using Axum.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::{Config, ProviderKind};
use crate::core::runtime::SignalRuntime;
use crate::error::ProviderError;
use crate::metrics::Metrics;
use crate::models::strategy::StrategyKind;
use crate::services::alpha_vantage::AlphaVantageProvider;
use crate::services::market_data::{Interval, MarketDataProvider};
use crate::services::yahoo::YahooProvider;

#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<SignalRuntime>,
    pub metrics: Arc<Metrics>,
    pub health: Arc<RwLock<HealthStatus>>,
    pub start_time: Arc<Instant>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "chartpulse"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

fn provider_status(e: &ProviderError) -> StatusCode {
    match e {
        ProviderError::UnsupportedInterval(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[derive(Debug, Deserialize)]
struct InsightQuery {
    interval: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BacktestQuery {
    strategy: Option<String>,
    interval: Option<String>,
}

fn parse_interval(raw: Option<&str>) -> Result<Interval, StatusCode> {
    match raw {
        None => Ok(Interval::Daily),
        Some(code) => code.parse().map_err(|e| {
            warn!(error = %e, "rejected interval parameter");
            StatusCode::BAD_REQUEST
        }),
    }
}

/// Evaluate the latest bar of a symbol and report the insight.
async fn get_insight(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<InsightQuery>,
) -> Result<Json<Value>, StatusCode> {
    let interval = parse_interval(params.interval.as_deref())?;
    let report = state
        .runtime
        .insight(&symbol, interval)
        .await
        .map_err(|e| {
            error!(error = %e, symbol, "insight request failed");
            provider_status(&e)
        })?;
    Ok(Json(json!(report)))
}

/// Replay a strategy over a symbol's history and report the signal log.
async fn get_backtest(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<BacktestQuery>,
) -> Result<Json<Value>, StatusCode> {
    let interval = parse_interval(params.interval.as_deref())?;
    let strategy: StrategyKind = params
        .strategy
        .as_deref()
        .unwrap_or("ema_crossover")
        .parse()
        .map_err(|e| {
            warn!(error = %e, "rejected strategy parameter");
            StatusCode::BAD_REQUEST
        })?;

    let report = state
        .runtime
        .backtest(&symbol, interval, strategy)
        .await
        .map_err(|e| {
            error!(error = %e, symbol, strategy = %strategy, "backtest request failed");
            provider_status(&e)
        })?;
    Ok(Json(json!(report)))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/insight/{symbol}", get(get_insight))
        .route("/api/backtest/{symbol}", get(get_backtest))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Build the configured market-data provider.
pub fn build_provider(
    config: &Config,
) -> Result<Arc<dyn MarketDataProvider>, Box<dyn std::error::Error>> {
    match config.provider {
        ProviderKind::Yahoo => Ok(Arc::new(YahooProvider::new(config.yahoo_base_url.clone()))),
        ProviderKind::AlphaVantage => {
            let api_key = config
                .alpha_vantage_api_key
                .clone()
                .ok_or("ALPHA_VANTAGE_API_KEY required for the alpha_vantage provider")?;
            Ok(Arc::new(AlphaVantageProvider::new(
                config.alpha_vantage_base_url.clone(),
                api_key,
            )))
        }
    }
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = build_provider(&config)?;
    let runtime = Arc::new(SignalRuntime::new(provider, metrics.clone()));

    let state = AppState {
        runtime,
        metrics,
        health: Arc::new(RwLock::new(HealthStatus::default())),
        start_time: Arc::new(Instant::now()),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
