#![forbid(unsafe_code)]

//! Global `tracing` subscriber for the audit binary.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Preferred filter variable; `RUST_LOG` is the fallback.
pub const ENV_LOG: &str = "FOLIO_LOG";

const DEFAULT_FILTER: &str = "info";

/// Pick the filter directive: `FOLIO_LOG`, then `RUST_LOG`, then `info`.
pub fn filter_directive(env: impl Fn(&str) -> Option<String>) -> String {
    [ENV_LOG, "RUST_LOG"]
        .into_iter()
        .find_map(|key| env(key).filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber, writing to stderr.
pub fn init(json: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let directive = filter_directive(|key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
    }
}
