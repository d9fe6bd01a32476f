//! Service surface around the level pipeline

pub mod http;

pub use http::*;
