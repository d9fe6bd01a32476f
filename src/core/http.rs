//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
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

use crate::config::LevelSettings;
use crate::indicators::horizon::Horizon;
use crate::indicators::structure::{calculate_key_levels, calculate_support_resistance};
use crate::indicators::timeframe::Timeframe;
use crate::ingest::parse_candles;
use crate::metrics::Metrics;
use crate::models::indicators::{sort_chronologically, Candle, RawCandle};
use crate::models::levels::{KeyLevel, PriceLevel};
use crate::store::MarketStore;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub store: Arc<MarketStore>,
    pub settings: LevelSettings,
}

impl AppState {
    pub fn new(metrics: Arc<Metrics>, store: Arc<MarketStore>, settings: LevelSettings) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            store,
            settings,
        }
    }
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

/// Error surfaced to HTTP clients as `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn parse_timeframe(token: &str) -> Result<Timeframe, ApiError> {
    token.parse::<Timeframe>().map_err(|e| {
        warn!(timeframe = token, "Rejected request with unsupported timeframe");
        ApiError::bad_request(e.to_string())
    })
}

fn parse_horizon(token: &str) -> Result<Horizon, ApiError> {
    token.parse::<Horizon>().map_err(|e| {
        warn!(horizon = token, "Rejected request with unsupported horizon");
        ApiError::bad_request(e.to_string())
    })
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "keylevels"
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
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct TickerQuery {
    ticker: String,
}

#[derive(Debug, Deserialize)]
struct LevelsQuery {
    ticker: String,
    timeframe: String,
}

#[derive(Debug, Serialize)]
struct StoredCandlesResponse {
    ticker: String,
    timeframe: Timeframe,
    count: usize,
}

#[derive(Debug, Deserialize)]
struct ComputeLevelsRequest {
    ticker: String,
    timeframe: String,
    #[serde(default)]
    candles: Option<Vec<RawCandle>>,
}

#[derive(Debug, Serialize)]
struct LevelsResponse {
    ticker: String,
    timeframe: Timeframe,
    levels: Vec<PriceLevel>,
}

#[derive(Debug, Serialize)]
struct StoredHorizonResponse {
    ticker: String,
    horizon: Horizon,
    count: usize,
}

#[derive(Debug, Serialize)]
struct KeyLevelsResponse {
    ticker: String,
    levels: Vec<KeyLevel>,
}

async fn store_candles(
    state: &AppState,
    ticker: String,
    timeframe: Timeframe,
    candles: Vec<Candle>,
) -> StoredCandlesResponse {
    let count = state.store.store_candles(&ticker, timeframe, candles).await;
    info!(ticker = %ticker, timeframe = %timeframe, count, "Stored candles");
    StoredCandlesResponse {
        ticker,
        timeframe,
        count,
    }
}

/// Store a JSON array of bars for a ticker
async fn upload_candles(
    State(state): State<AppState>,
    Path(timeframe): Path<String>,
    Query(params): Query<TickerQuery>,
    Json(raw): Json<Vec<RawCandle>>,
) -> Result<Json<StoredCandlesResponse>, ApiError> {
    let timeframe = parse_timeframe(&timeframe)?;
    let candles = raw.iter().map(Candle::from).collect();
    Ok(Json(store_candles(&state, params.ticker, timeframe, candles).await))
}

/// Store bars from an uploaded CSV export
async fn upload_csv(
    State(state): State<AppState>,
    Path(timeframe): Path<String>,
    Query(params): Query<TickerQuery>,
    body: String,
) -> Result<Json<StoredCandlesResponse>, ApiError> {
    let timeframe = parse_timeframe(&timeframe)?;
    let raw = parse_candles(body.as_bytes()).map_err(|e| {
        warn!(error = %e, ticker = %params.ticker, "Rejected CSV upload");
        ApiError::bad_request(e.to_string())
    })?;

    let mut candles: Vec<Candle> = raw.iter().map(Candle::from).collect();
    sort_chronologically(&mut candles);
    Ok(Json(store_candles(&state, params.ticker, timeframe, candles).await))
}

/// Get stored bars for a ticker
async fn get_candles(
    State(state): State<AppState>,
    Path(timeframe): Path<String>,
    Query(params): Query<TickerQuery>,
) -> Result<Json<Vec<Candle>>, ApiError> {
    let timeframe = parse_timeframe(&timeframe)?;
    state
        .store
        .get_candles(&params.ticker, timeframe)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No candles for {} {}", params.ticker, timeframe)))
}

/// Compute levels from supplied or stored bars, store and return them
async fn compute_levels(
    State(state): State<AppState>,
    Json(request): Json<ComputeLevelsRequest>,
) -> Result<Json<LevelsResponse>, ApiError> {
    let timeframe = parse_timeframe(&request.timeframe)?;

    let candles = match request.candles {
        Some(raw) => raw.iter().map(Candle::from).collect(),
        None => state
            .store
            .get_candles(&request.ticker, timeframe)
            .await
            .ok_or_else(|| {
                ApiError::not_found(format!("No candles for {} {}", request.ticker, timeframe))
            })?,
    };

    let min_strength = state.settings.min_strength;
    let levels = tokio::task::spawn_blocking(move || {
        calculate_support_resistance(&candles, timeframe, min_strength)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Level computation task failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "level computation failed")
    })?;

    state.metrics.levels_computed_total.inc();
    state
        .store
        .store_levels(&request.ticker, timeframe, levels.clone())
        .await;
    info!(
        ticker = %request.ticker,
        timeframe = %timeframe,
        levels = levels.len(),
        "Stored key levels"
    );

    Ok(Json(LevelsResponse {
        ticker: request.ticker,
        timeframe,
        levels,
    }))
}

/// Get the last computed levels for a ticker and timeframe
async fn get_levels(
    State(state): State<AppState>,
    Query(params): Query<LevelsQuery>,
) -> Result<Json<LevelsResponse>, ApiError> {
    let timeframe = parse_timeframe(&params.timeframe)?;
    let levels = state
        .store
        .get_levels(&params.ticker, timeframe)
        .await
        .ok_or_else(|| ApiError::not_found(format!("No levels for {} {}", params.ticker, timeframe)))?;

    Ok(Json(LevelsResponse {
        ticker: params.ticker,
        timeframe,
        levels,
    }))
}

/// Store daily, weekly or monthly bars for multi-horizon key levels
async fn upload_horizon_candles(
    State(state): State<AppState>,
    Path(horizon): Path<String>,
    Query(params): Query<TickerQuery>,
    Json(raw): Json<Vec<RawCandle>>,
) -> Result<Json<StoredHorizonResponse>, ApiError> {
    let horizon = parse_horizon(&horizon)?;
    let mut candles: Vec<Candle> = raw.iter().map(Candle::from).collect();
    sort_chronologically(&mut candles);

    let count = state
        .store
        .store_horizon_candles(&params.ticker, horizon, candles)
        .await;
    info!(ticker = %params.ticker, horizon = %horizon, count, "Stored horizon candles");

    Ok(Json(StoredHorizonResponse {
        ticker: params.ticker,
        horizon,
        count,
    }))
}

async fn get_horizon_candles(
    State(state): State<AppState>,
    Path(horizon): Path<String>,
    Query(params): Query<TickerQuery>,
) -> Result<Json<Vec<Candle>>, ApiError> {
    let horizon = parse_horizon(&horizon)?;
    state
        .store
        .get_horizon_candles(&params.ticker, horizon)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No candles for {} {}", params.ticker, horizon)))
}

/// Rank stored daily/weekly/monthly prices into key levels
///
/// A horizon with no stored bars counts as empty; 404 only when none are stored.
async fn get_horizon_key_levels(
    State(state): State<AppState>,
    Query(params): Query<TickerQuery>,
) -> Result<Json<KeyLevelsResponse>, ApiError> {
    let store = &state.store;
    let daily = store.get_horizon_candles(&params.ticker, Horizon::Daily).await;
    let weekly = store.get_horizon_candles(&params.ticker, Horizon::Weekly).await;
    let monthly = store.get_horizon_candles(&params.ticker, Horizon::Monthly).await;

    if daily.is_none() && weekly.is_none() && monthly.is_none() {
        return Err(ApiError::not_found(format!(
            "No horizon candles for {}",
            params.ticker
        )));
    }
    let daily = daily.unwrap_or_default();
    let weekly = weekly.unwrap_or_default();
    let monthly = monthly.unwrap_or_default();

    let levels = calculate_key_levels(&daily, &weekly, &monthly, &params.ticker);
    info!(ticker = %params.ticker, levels = levels.len(), "Computed horizon key levels");

    Ok(Json(KeyLevelsResponse {
        ticker: params.ticker,
        levels,
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/ohlc/{timeframe}", get(get_candles).post(upload_candles))
        .route("/ohlc/{timeframe}/csv", axum::routing::post(upload_csv))
        .route("/key-levels", get(get_levels).post(compute_levels))
        .route(
            "/horizons/{horizon}",
            get(get_horizon_candles).post(upload_horizon_candles),
        )
        .route("/key-levels/horizons", get(get_horizon_key_levels))
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

pub async fn start_server(port: u16, settings: LevelSettings) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let store = Arc::new(MarketStore::new());
    let state = AppState::new(metrics, store, settings);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        min_strength = settings.min_strength,
        "Levels at or below min_strength are filtered"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
