//! Bar horizons that feed multi-horizon key levels.
//!
//! Kept apart from [`Timeframe`](crate::indicators::Timeframe): weekly and
//! monthly bars have no swing parameters and never reach the level pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1w")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Daily, Horizon::Weekly, Horizon::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Daily => "1d",
            Horizon::Weekly => "1w",
            Horizon::Monthly => "1mo",
        }
    }
}

impl FromStr for Horizon {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Horizon::Daily),
            "1w" => Ok(Horizon::Weekly),
            "1mo" => Ok(Horizon::Monthly),
            other => Err(IndicatorError::UnsupportedHorizon(other.to_string())),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
