//! Unit tests for the in-memory market store

use crate::fixtures::{candle, v_shape};
use keylevels::indicators::{Horizon, Timeframe};
use keylevels::models::{LevelType, PriceLevel};
use keylevels::store::MarketStore;

#[tokio::test]
async fn test_store_and_fetch_candles() {
    let store = MarketStore::new();
    let count = store
        .store_candles("AAPL", Timeframe::OneDay, v_shape())
        .await;
    assert_eq!(count, 20);

    let candles = store.get_candles("AAPL", Timeframe::OneDay).await.unwrap();
    assert_eq!(candles, v_shape());
}

#[tokio::test]
async fn test_series_are_keyed_by_ticker_and_timeframe() {
    let store = MarketStore::new();
    store
        .store_candles("AAPL", Timeframe::OneDay, v_shape())
        .await;

    assert!(store.get_candles("AAPL", Timeframe::OneHour).await.is_none());
    assert!(store.get_candles("MSFT", Timeframe::OneDay).await.is_none());
}

#[tokio::test]
async fn test_store_levels_replaces_previous() {
    let store = MarketStore::new();
    let level = |price: f64| PriceLevel {
        price,
        strength: 100.0,
        level_type: LevelType::Support,
    };

    store
        .store_levels("AAPL", Timeframe::FiveMinutes, vec![level(1.0), level(2.0)])
        .await;
    store
        .store_levels("AAPL", Timeframe::FiveMinutes, vec![level(3.0)])
        .await;

    let levels = store
        .get_levels("AAPL", Timeframe::FiveMinutes)
        .await
        .unwrap();
    assert_eq!(levels, vec![level(3.0)]);
}

#[tokio::test]
async fn test_horizon_series_are_separate_from_timeframes() {
    let store = MarketStore::new();
    let weekly = vec![candle(10.0, 12.0, 9.0, 11.0, 0.0, 0)];
    let count = store
        .store_horizon_candles("AAPL", Horizon::Weekly, weekly.clone())
        .await;
    assert_eq!(count, 1);

    assert_eq!(
        store.get_horizon_candles("AAPL", Horizon::Weekly).await,
        Some(weekly)
    );
    assert!(store.get_horizon_candles("AAPL", Horizon::Daily).await.is_none());
    assert!(store.get_candles("AAPL", Timeframe::OneDay).await.is_none());
}
