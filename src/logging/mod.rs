//! Tracing setup shared by the `keylevels` CLI and the `api-server` binary.
//!
//! `ENVIRONMENT=production` (or `prod`) emits one JSON object per event so
//! level computations and uploads can be searched by ticker and timeframe.
//! Anything else prints coloured lines for a terminal. `RUST_LOG` overrides
//! the default `info` filter in both cases.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn is_production(env: &str) -> bool {
    matches!(env, "production" | "prod")
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber for the current `ENVIRONMENT`.
///
/// A second call keeps the subscriber already installed, so tests and the
/// CLI can both call this without coordinating.
pub fn init_logging() {
    let registry = tracing_subscriber::registry().with(default_filter());
    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout);

    let result = if is_production(&get_environment()) {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer.with_ansi(true)).try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Subscriber already installed, keeping it");
    }
}
