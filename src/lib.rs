//! Support/resistance level detection for OHLC price series.
//!
//! The pipeline lives in [`indicators::structure::support_resistance`]; the
//! remaining modules feed it bars (CSV ingestion, HTTP) and hold its output.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod store;
