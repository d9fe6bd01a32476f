//! Candle builders shared across unit tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use keylevels::models::Candle;

pub fn day(index: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(index)
}

/// Daily bar covering the session from 00:00 to 23:59 on `day(index)`.
pub fn candle(open: f64, high: f64, low: f64, close: f64, volume: f64, index: i64) -> Candle {
    Candle::new(open, high, low, close, volume, day(index))
        .with_end_time(day(index) + Duration::minutes(23 * 60 + 59))
}

/// 20 daily bars falling 2.0 per bar into a single trough at bar 10, then rising again.
///
/// Each bar has open == close, high = close + 1, low = close - 1 and volume 1000.
pub fn v_shape() -> Vec<Candle> {
    (0..20)
        .map(|i| {
            let close = 100.0 + 2.0 * (i as f64 - 10.0).abs();
            candle(close, close + 1.0, close - 1.0, close, 1000.0, i)
        })
        .collect()
}
