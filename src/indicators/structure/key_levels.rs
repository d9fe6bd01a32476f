//! Key levels taken verbatim from daily, weekly and monthly bars
//!
//! Monthly prices are strong. Weekly prices are strong when a monthly bar
//! shares one of its prices field-for-field, medium otherwise. Daily prices
//! follow the same rule against monthly (strong) then weekly (medium) bars,
//! and are low when neither matches.

use crate::models::indicators::Candle;
use crate::models::levels::{KeyLevel, KeyLevelStrength};

/// Same open, high, low or close, compared field-for-field.
fn shares_price(a: &Candle, b: &Candle) -> bool {
    a.open == b.open || a.high == b.high || a.low == b.low || a.close == b.close
}

fn matches_any(candle: &Candle, others: &[Candle]) -> bool {
    others.iter().any(|other| shares_price(other, candle))
}

struct KeyLevelBuilder<'a> {
    ticker: &'a str,
    levels: Vec<KeyLevel>,
    next_id: u64,
}

impl<'a> KeyLevelBuilder<'a> {
    fn new(ticker: &'a str) -> Self {
        Self {
            ticker,
            levels: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a level unless the same price is already recorded with the same strength.
    fn add(&mut self, price: f64, strength: KeyLevelStrength, candle: &Candle) {
        if self
            .levels
            .iter()
            .any(|l| l.price == price && l.strength == strength)
        {
            return;
        }
        self.levels.push(KeyLevel {
            id: self.next_id,
            price,
            ticker: self.ticker.to_string(),
            strength,
            last_date: candle.start_time,
        });
        self.next_id += 1;
    }

    fn add_candle(&mut self, candle: &Candle, strength: KeyLevelStrength) {
        self.add(candle.open, strength, candle);
        self.add(candle.high, strength, candle);
        self.add(candle.low, strength, candle);
        self.add(candle.close, strength, candle);
    }
}

/// Rank bar prices by the horizons they recur on.
///
/// Monthly bars are processed first, then weekly, then daily, so the first
/// (highest) strength recorded for a price is listed first.
pub fn calculate_key_levels(
    daily: &[Candle],
    weekly: &[Candle],
    monthly: &[Candle],
    ticker: &str,
) -> Vec<KeyLevel> {
    let mut builder = KeyLevelBuilder::new(ticker);

    for candle in monthly {
        builder.add_candle(candle, KeyLevelStrength::Strong);
    }

    for candle in weekly {
        let strength = if matches_any(candle, monthly) {
            KeyLevelStrength::Strong
        } else {
            KeyLevelStrength::Medium
        };
        builder.add_candle(candle, strength);
    }

    for candle in daily {
        let strength = if matches_any(candle, monthly) {
            KeyLevelStrength::Strong
        } else if matches_any(candle, weekly) {
            KeyLevelStrength::Medium
        } else {
            KeyLevelStrength::Low
        };
        builder.add_candle(candle, strength);
    }

    builder.levels
}
