//! Shared data models spanning the pipeline, ingestion and API layers.

pub mod indicators;
pub mod levels;

pub use indicators::{sort_chronologically, Candle, RawCandle};
pub use levels::{KeyLevel, KeyLevelStrength, LevelType, PriceLevel, RawLevel};
