pub mod error;
pub mod horizon;
pub mod parser;
pub mod timeframe;

pub mod structure;

pub use error::IndicatorError;
pub use horizon::Horizon;
pub use parser::*;
pub use timeframe::{resolve, Timeframe, TimeframeConfig};
