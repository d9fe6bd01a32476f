use thiserror::Error;

/// Errors raised by the level pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("Unsupported time frame: {0}")]
    UnsupportedTimeframe(String),
    #[error("Unsupported horizon: {0}")]
    UnsupportedHorizon(String),
}
