//! Support and Resistance levels detection
//!
//! Four stages, each a pure function of its inputs:
//!
//! 1. [`detect_swings`]: bars whose high/low/open/close strictly beat every
//!    neighbor within the lookback window contribute that price.
//! 2. [`cluster_levels`]: sorted swing prices are merged greedily while they
//!    stay within tolerance of the cluster's first member.
//! 3. [`score_levels`]: closes landing within tolerance of a level count as
//!    touches; touches and their volume are weighted into a raw strength.
//! 4. [`normalize_levels`]: raw strengths are min-max scaled to 0-100,
//!    rounded, filtered and ranked.

use std::cmp::Ordering;

use tracing::debug;

use crate::common::math::{
    max_propagating_nan, mean, min_propagating_nan, relative_distance, round_half_up,
};
use crate::config::DEFAULT_MIN_STRENGTH;
use crate::indicators::error::IndicatorError;
use crate::indicators::timeframe::{Timeframe, TimeframeConfig};
use crate::models::indicators::Candle;
use crate::models::levels::{LevelType, PriceLevel, RawLevel};

/// `true` when no neighbor within `lookback` bars of `index` satisfies `disqualifies(neighbor, current)`.
///
/// Written as the absence of a disqualifying neighbor so a NaN on either side
/// never rules a swing out.
fn beats_neighbors<F, C>(
    candles: &[Candle],
    index: usize,
    lookback: usize,
    field: F,
    disqualifies: C,
) -> bool
where
    F: Fn(&Candle) -> f64,
    C: Fn(f64, f64) -> bool,
{
    let current = field(&candles[index]);
    (1..=lookback).all(|offset| {
        !disqualifies(field(&candles[index - offset]), current)
            && !disqualifies(field(&candles[index + offset]), current)
    })
}

fn is_swing_high<F: Fn(&Candle) -> f64>(
    candles: &[Candle],
    index: usize,
    lookback: usize,
    field: F,
) -> bool {
    beats_neighbors(candles, index, lookback, field, |neighbor, current| {
        neighbor >= current
    })
}

fn is_swing_low<F: Fn(&Candle) -> f64>(
    candles: &[Candle],
    index: usize,
    lookback: usize,
    field: F,
) -> bool {
    beats_neighbors(candles, index, lookback, field, |neighbor, current| {
        neighbor <= current
    })
}

/// Extract swing prices from `candles`.
///
/// Every bar with `lookback` bars on both sides can contribute up to six
/// values, pushed in this order: swing high, swing low, open-high, open-low,
/// close-high, close-low. Duplicates are kept. Series of `2 * lookback` bars
/// or fewer yield nothing.
pub fn detect_swings(candles: &[Candle], lookback: usize) -> Vec<f64> {
    let mut swings = Vec::new();
    if candles.len() <= lookback * 2 {
        return swings;
    }

    for i in lookback..candles.len() - lookback {
        let candle = &candles[i];

        if is_swing_high(candles, i, lookback, |c| c.high) {
            swings.push(candle.high);
        }
        if is_swing_low(candles, i, lookback, |c| c.low) {
            swings.push(candle.low);
        }
        if is_swing_high(candles, i, lookback, |c| c.open) {
            swings.push(candle.open);
        }
        if is_swing_low(candles, i, lookback, |c| c.open) {
            swings.push(candle.open);
        }
        if is_swing_high(candles, i, lookback, |c| c.close) {
            swings.push(candle.close);
        }
        if is_swing_low(candles, i, lookback, |c| c.close) {
            swings.push(candle.close);
        }
    }

    swings
}

/// Merge swing prices into levels.
///
/// Prices are sorted ascending. A price joins the open cluster when its
/// relative distance from the cluster's first member is within `tolerance`;
/// otherwise the cluster closes as its mean and the price anchors a new one.
/// The anchor never moves, so a long run of small steps can still split.
pub fn cluster_levels(swings: &[f64], tolerance: f64) -> Vec<f64> {
    if swings.is_empty() {
        return Vec::new();
    }

    let mut sorted = swings.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut levels = Vec::new();
    let mut cluster = vec![sorted[0]];

    for &price in &sorted[1..] {
        if relative_distance(price, cluster[0]) <= tolerance {
            cluster.push(price);
        } else {
            levels.push(mean(&cluster));
            cluster = vec![price];
        }
    }
    levels.push(mean(&cluster));

    levels
}

/// Classify a level by the first bar whose close equals it exactly.
///
/// Clustered prices are means, so a match only happens when the level came
/// from a single close. No match falls back to support.
fn classify_level(candles: &[Candle], price: f64) -> LevelType {
    match candles.iter().find(|c| c.close == price) {
        Some(candle) if candle.close >= price => LevelType::Resistance,
        _ => LevelType::Support,
    }
}

/// Compute the raw (unnormalized) strength and type of each level.
pub fn score_levels(candles: &[Candle], levels: &[f64], config: &TimeframeConfig) -> Vec<RawLevel> {
    levels
        .iter()
        .map(|&price| {
            let mut touch_count = 0usize;
            let mut total_volume = 0.0;

            for candle in candles {
                if relative_distance(candle.close, price) <= config.cluster_tolerance {
                    touch_count += 1;
                    total_volume += candle.volume;
                }
            }

            let strength =
                touch_count as f64 * config.touch_weight + total_volume * config.volume_weight;

            RawLevel {
                price,
                strength,
                level_type: classify_level(candles, price),
            }
        })
        .collect()
}

/// Scale raw strengths to 0-100 across the batch, round, filter and rank.
///
/// When every raw strength is equal (including a single level) each level
/// scores exactly 100. Levels scoring `min_strength` or below are dropped.
/// The result is sorted by strength descending; ties keep input order.
pub fn normalize_levels(raw: &[RawLevel], min_strength: f64) -> Vec<PriceLevel> {
    if raw.is_empty() {
        return Vec::new();
    }

    let strengths: Vec<f64> = raw.iter().map(|l| l.strength).collect();
    let min = min_propagating_nan(&strengths);
    let max = max_propagating_nan(&strengths);

    let mut levels: Vec<PriceLevel> = raw
        .iter()
        .map(|level| {
            let normalized = if max != min {
                (level.strength - min) / (max - min) * 100.0
            } else {
                100.0
            };
            PriceLevel {
                price: round_half_up(level.price, 2),
                strength: round_half_up(normalized, 2),
                level_type: level.level_type,
            }
        })
        .filter(|level| level.strength > min_strength)
        .collect();

    levels.sort_by(|a, b| b.strength.partial_cmp(&a.strength).unwrap_or(Ordering::Equal));
    levels
}

/// Run the full pipeline for a resolved timeframe with an explicit strength threshold.
pub fn calculate_support_resistance(
    candles: &[Candle],
    timeframe: Timeframe,
    min_strength: f64,
) -> Vec<PriceLevel> {
    let config = timeframe.config();
    let swings = detect_swings(candles, config.swing_lookback);
    let clusters = cluster_levels(&swings, config.cluster_tolerance);
    let raw = score_levels(candles, &clusters, &config);
    let levels = normalize_levels(&raw, min_strength);

    debug!(
        timeframe = %timeframe,
        candles = candles.len(),
        swings = swings.len(),
        clusters = clusters.len(),
        levels = levels.len(),
        "Computed support/resistance levels"
    );

    levels
}

/// Compute ranked support/resistance levels for a timeframe token.
///
/// Fails with [`IndicatorError::UnsupportedTimeframe`] for tokens outside
/// `5m`, `10m`, `1h` and `1d`. Uses the default strength threshold of 20.
pub fn find_support_resistance(
    candles: &[Candle],
    timeframe: &str,
) -> Result<Vec<PriceLevel>, IndicatorError> {
    let timeframe: Timeframe = timeframe.parse()?;
    Ok(calculate_support_resistance(
        candles,
        timeframe,
        DEFAULT_MIN_STRENGTH,
    ))
}
