//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and the level workflows.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use serde_json::{json, Value};

use test_utils::{bar_payload, v_shape_payload, TestApiServer, CSV_EXPORT};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "keylevels");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("levels_computed_total"));
}

#[tokio::test]
async fn compute_levels_from_supplied_candles() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .post("/key-levels")
        .json(&json!({
            "ticker": "AAPL",
            "timeframe": "1d",
            "candles": v_shape_payload(),
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["ticker"], "AAPL");
    assert_eq!(body["timeframe"], "1d");
    assert_eq!(
        body["levels"],
        json!([{ "price": 100.0, "strength": 100.0, "type": "resistance" }])
    );
    assert_eq!(app.metrics.levels_computed_total.get(), 1);
}

#[tokio::test]
async fn computed_levels_are_retrievable() {
    let app = TestApiServer::new().await;
    app.server
        .post("/key-levels")
        .json(&json!({
            "ticker": "AAPL",
            "timeframe": "1d",
            "candles": v_shape_payload(),
        }))
        .await;

    let response = app
        .server
        .get("/key-levels")
        .add_query_param("ticker", "AAPL")
        .add_query_param("timeframe", "1d")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["levels"][0]["type"], "resistance");
}

#[tokio::test]
async fn missing_levels_return_not_found() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/key-levels")
        .add_query_param("ticker", "AAPL")
        .add_query_param("timeframe", "1h")
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn unsupported_timeframe_is_rejected() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/key-levels")
        .json(&json!({ "ticker": "AAPL", "timeframe": "3d", "candles": [] }))
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "Unsupported time frame: 3d");

    let response = app
        .server
        .get("/ohlc/3d")
        .add_query_param("ticker", "AAPL")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn empty_candles_yield_no_levels() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/key-levels")
        .json(&json!({ "ticker": "AAPL", "timeframe": "5m", "candles": [] }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["levels"], json!([]));
}

#[tokio::test]
async fn stored_candles_feed_level_computation() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .post("/ohlc/1d")
        .add_query_param("ticker", "MSFT")
        .json(&v_shape_payload())
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["count"], 20);

    let response = app
        .server
        .get("/ohlc/1d")
        .add_query_param("ticker", "MSFT")
        .await;
    assert_eq!(response.status_code(), 200);
    let candles: Value = response.json();
    assert_eq!(candles.as_array().map(Vec::len), Some(20));
    assert_eq!(candles[10]["close"], 100.0);

    let response = app
        .server
        .post("/key-levels")
        .json(&json!({ "ticker": "MSFT", "timeframe": "1d" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["levels"][0]["price"], 100.0);
}

#[tokio::test]
async fn compute_without_candles_or_stored_series_is_not_found() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/key-levels")
        .json(&json!({ "ticker": "TSLA", "timeframe": "1h" }))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn csv_upload_is_stored_in_chronological_order() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .post("/ohlc/1d/csv")
        .add_query_param("ticker", "XYZ")
        .text(CSV_EXPORT)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["count"], 2);

    let response = app
        .server
        .get("/ohlc/1d")
        .add_query_param("ticker", "XYZ")
        .await;
    let candles: Value = response.json();
    assert_eq!(candles[0]["close"], 56.79);
    assert_eq!(candles[0]["volume"], 45000.0);
    assert_eq!(candles[1]["close"], 57.01);
}

#[tokio::test]
async fn malformed_csv_is_rejected() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/ohlc/1d/csv")
        .add_query_param("ticker", "XYZ")
        .text("Date,Price\n09/08/2023,1\n")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn horizon_bars_are_stored_in_chronological_order() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .post("/horizons/1w")
        .add_query_param("ticker", "AAPL")
        .json(&json!([
            bar_payload(30.0, 32.0, 29.0, 31.0, "2024-01-08"),
            bar_payload(20.0, 22.0, 19.0, 21.0, "2024-01-01"),
        ]))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["horizon"], "1w");
    assert_eq!(body["count"], 2);

    let response = app
        .server
        .get("/horizons/1w")
        .add_query_param("ticker", "AAPL")
        .await;
    let candles: Value = response.json();
    assert_eq!(candles[0]["close"], 21.0);
    assert_eq!(candles[1]["close"], 31.0);
}

#[tokio::test]
async fn key_levels_ranked_across_stored_horizons() {
    let app = TestApiServer::new().await;
    let upload = |horizon: &'static str, bar: Value| {
        app.server
            .post(&format!("/horizons/{}", horizon))
            .add_query_param("ticker", "AAPL")
            .json(&json!([bar]))
    };

    upload("1mo", bar_payload(10.0, 12.0, 9.0, 11.0, "2024-01-01")).await;
    upload("1w", bar_payload(30.0, 32.0, 29.0, 31.0, "2024-01-08")).await;
    // Shares the monthly high
    upload("1d", bar_payload(50.0, 12.0, 49.0, 51.0, "2024-01-09")).await;

    let response = app
        .server
        .get("/key-levels/horizons")
        .add_query_param("ticker", "AAPL")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["ticker"], "AAPL");
    let levels = body["levels"].as_array().unwrap();
    // 12.0 is already recorded as strong, so the daily bar adds three prices
    assert_eq!(levels.len(), 11);
    assert_eq!(levels[0]["strength"], "strong");
    assert_eq!(levels[4]["price"], 30.0);
    assert_eq!(levels[4]["strength"], "medium");
    assert_eq!(levels[8]["price"], 50.0);
    assert_eq!(levels[8]["strength"], "strong");
}

#[tokio::test]
async fn horizon_key_levels_need_stored_bars() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/key-levels/horizons")
        .add_query_param("ticker", "NVDA")
        .await;
    assert_eq!(response.status_code(), 404);

    let response = app
        .server
        .post("/horizons/5m")
        .add_query_param("ticker", "NVDA")
        .json(&json!([]))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Unsupported horizon: 5m");
}
