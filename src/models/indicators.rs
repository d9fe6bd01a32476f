use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indicators::parser::parse_price;

/// One sampled interval of a price series.
///
/// Ordering across a slice of candles is assumed chronological. `low <= open, close <= high`
/// is expected but not enforced, and fields may hold NaN when the source was not numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            start_time,
            end_time: start_time,
        }
    }

    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = end_time;
        self
    }
}

/// Bar as delivered by feeds and uploads: prices are decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandle {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub market_time: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl RawCandle {
    /// Parse prices permissively; non-numeric strings become NaN rather than errors.
    pub fn to_candle(&self) -> Candle {
        Candle {
            open: parse_price(&self.open),
            high: parse_price(&self.high),
            low: parse_price(&self.low),
            close: parse_price(&self.close),
            volume: self.volume,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

impl From<&RawCandle> for Candle {
    fn from(raw: &RawCandle) -> Self {
        raw.to_candle()
    }
}

/// Sort candles by start time, keeping the relative order of equal timestamps.
pub fn sort_chronologically(candles: &mut [Candle]) {
    candles.sort_by_key(|c| c.start_time);
}
