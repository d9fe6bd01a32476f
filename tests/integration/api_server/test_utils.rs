//! Test utilities for API server integration tests

use axum_test::TestServer;
use keylevels::config::LevelSettings;
use keylevels::core::http::{create_router, AppState};
use keylevels::metrics::Metrics;
use keylevels::store::MarketStore;
use serde_json::{json, Value};
use std::sync::Arc;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub store: Arc<MarketStore>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let store = Arc::new(MarketStore::new());
        let state = AppState::new(metrics.clone(), store.clone(), LevelSettings::default());

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            store,
        }
    }
}

/// 20 daily bars as wire JSON, with a single trough at bar 10 (close 100).
pub fn v_shape_payload() -> Value {
    let candles: Vec<Value> = (0..20)
        .map(|i: i64| {
            let close = 100.0 + 2.0 * ((i - 10) as f64).abs();
            let date = format!("2024-01-{:02}T00:00:00Z", i + 1);
            json!({
                "open": format!("{}", close),
                "high": format!("{}", close + 1.0),
                "low": format!("{}", close - 1.0),
                "close": format!("{}", close),
                "volume": 1000.0,
                "start_time": date,
                "end_time": date,
            })
        })
        .collect();
    Value::Array(candles)
}

/// One wire bar starting at midnight UTC on `date` (`YYYY-MM-DD`).
pub fn bar_payload(open: f64, high: f64, low: f64, close: f64, date: &str) -> Value {
    json!({
        "open": open.to_string(),
        "high": high.to_string(),
        "low": low.to_string(),
        "close": close.to_string(),
        "volume": 0.0,
        "start_time": format!("{}T00:00:00Z", date),
        "end_time": format!("{}T23:59:00Z", date),
    })
}

pub const CSV_EXPORT: &str = "Date,Price,Open,High,Low,Vol.,Change %
09/08/2023,57.01,56.85,57.15,56.80,12.3M,0.39%
09/07/2023,56.79,56.79,56.79,56.79,45K,-0.10%
";
