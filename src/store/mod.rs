//! In-memory bars and computed levels keyed by ticker and timeframe.
//!
//! Daily, weekly and monthly bars for key levels live in a separate map keyed
//! by ticker and [`Horizon`].
//!
//! The store is an explicit handle: the server builds one at startup, shares
//! it through `Arc`, and drops it at shutdown. Nothing outlives the process.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::indicators::horizon::Horizon;
use crate::indicators::timeframe::Timeframe;
use crate::models::indicators::Candle;
use crate::models::levels::PriceLevel;

type SeriesKey = (String, Timeframe);
type HorizonKey = (String, Horizon);

#[derive(Default)]
pub struct MarketStore {
    candles: RwLock<HashMap<SeriesKey, Vec<Candle>>>,
    levels: RwLock<HashMap<SeriesKey, Vec<PriceLevel>>>,
    horizons: RwLock<HashMap<HorizonKey, Vec<Candle>>>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bars held for `(ticker, timeframe)`, returning how many were stored.
    pub async fn store_candles(&self, ticker: &str, timeframe: Timeframe, candles: Vec<Candle>) -> usize {
        let count = candles.len();
        self.candles
            .write()
            .await
            .insert((ticker.to_string(), timeframe), candles);
        count
    }

    pub async fn get_candles(&self, ticker: &str, timeframe: Timeframe) -> Option<Vec<Candle>> {
        self.candles
            .read()
            .await
            .get(&(ticker.to_string(), timeframe))
            .cloned()
    }

    /// Replace the levels held for `(ticker, timeframe)`.
    pub async fn store_levels(&self, ticker: &str, timeframe: Timeframe, levels: Vec<PriceLevel>) {
        self.levels
            .write()
            .await
            .insert((ticker.to_string(), timeframe), levels);
    }

    pub async fn get_levels(&self, ticker: &str, timeframe: Timeframe) -> Option<Vec<PriceLevel>> {
        self.levels
            .read()
            .await
            .get(&(ticker.to_string(), timeframe))
            .cloned()
    }

    /// Replace the `horizon` bars held for `ticker`, returning how many were stored.
    pub async fn store_horizon_candles(&self, ticker: &str, horizon: Horizon, candles: Vec<Candle>) -> usize {
        let count = candles.len();
        self.horizons
            .write()
            .await
            .insert((ticker.to_string(), horizon), candles);
        count
    }

    pub async fn get_horizon_candles(&self, ticker: &str, horizon: Horizon) -> Option<Vec<Candle>> {
        self.horizons
            .read()
            .await
            .get(&(ticker.to_string(), horizon))
            .cloned()
    }
}
