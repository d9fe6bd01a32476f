use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    Support,
    Resistance,
}

impl LevelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelType::Support => "support",
            LevelType::Resistance => "resistance",
        }
    }
}

/// A scored support/resistance level, the pipeline's output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Clustered price, rounded to cents.
    pub price: f64,
    /// Normalized 0-100 strength, rounded to cents.
    pub strength: f64,
    #[serde(rename = "type")]
    pub level_type: LevelType,
}

/// A level before normalization: price unrounded, strength in raw weighted units.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLevel {
    pub price: f64,
    pub strength: f64,
    pub level_type: LevelType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyLevelStrength {
    Strong,
    Medium,
    Low,
}

/// A price taken directly from a daily/weekly/monthly bar, ranked by the horizons it appears on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLevel {
    pub id: u64,
    pub price: f64,
    pub ticker: String,
    pub strength: KeyLevelStrength,
    pub last_date: DateTime<Utc>,
}
