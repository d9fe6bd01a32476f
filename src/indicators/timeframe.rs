//! Timeframe tokens and the fixed parameter table behind them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;

/// Closed set of supported bar intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "10m")]
    TenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

/// Parameters that drive swing detection, clustering and scoring for one timeframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeframeConfig {
    /// Bars on each side that must be beaten for a swing.
    pub swing_lookback: usize,
    /// Relative tolerance for merging swings and for counting touches.
    pub cluster_tolerance: f64,
    pub touch_weight: f64,
    pub volume_weight: f64,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::FiveMinutes,
        Timeframe::TenMinutes,
        Timeframe::OneHour,
        Timeframe::OneDay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::FiveMinutes => "5m",
            Timeframe::TenMinutes => "10m",
            Timeframe::OneHour => "1h",
            Timeframe::OneDay => "1d",
        }
    }

    pub fn config(&self) -> TimeframeConfig {
        match self {
            Timeframe::FiveMinutes => TimeframeConfig {
                swing_lookback: 5,
                cluster_tolerance: 0.002,
                volume_weight: 0.4,
                touch_weight: 0.6,
            },
            Timeframe::TenMinutes => TimeframeConfig {
                swing_lookback: 4,
                cluster_tolerance: 0.003,
                volume_weight: 0.45,
                touch_weight: 0.55,
            },
            Timeframe::OneHour => TimeframeConfig {
                swing_lookback: 3,
                cluster_tolerance: 0.005,
                volume_weight: 0.5,
                touch_weight: 0.5,
            },
            Timeframe::OneDay => TimeframeConfig {
                swing_lookback: 2,
                cluster_tolerance: 0.01,
                volume_weight: 0.6,
                touch_weight: 0.4,
            },
        }
    }
}

impl FromStr for Timeframe {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5m" => Ok(Timeframe::FiveMinutes),
            "10m" => Ok(Timeframe::TenMinutes),
            "1h" => Ok(Timeframe::OneHour),
            "1d" => Ok(Timeframe::OneDay),
            other => Err(IndicatorError::UnsupportedTimeframe(other.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a timeframe token to its parameters.
pub fn resolve(token: &str) -> Result<TimeframeConfig, IndicatorError> {
    token.parse::<Timeframe>().map(|tf| tf.config())
}
