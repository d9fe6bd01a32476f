//! Ingestion of uploaded price history into bars the pipeline understands.

pub mod csv;

use thiserror::Error;

pub use self::csv::{load_candles_from_csv, parse_candles, parse_session_date};

/// Errors from turning uploaded files into bars.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Missing column: {0}")]
    MissingField(String),

    #[error("Invalid date on row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Failed to open file: {0}")]
    Io(#[from] std::io::Error),
}
