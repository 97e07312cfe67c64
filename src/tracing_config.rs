//! Tracing configuration for debugging silent resolution misses.
//!
//! The resolver's contract is best-effort enrichment: unresolved bindings
//! are omitted from the result rather than reported. When a host needs to
//! see why a symbol went missing, set `TSORIGIN_LOG` (same syntax as
//! `RUST_LOG`, which is also honored) and every skipped specifier, failed
//! chain branch, and external-resolution miss is emitted as an event.
//!
//! Output format is controlled by `TSORIGIN_LOG_FORMAT`:
//! - `text` (default): standard flat `tracing-subscriber` output
//! - `json`: one JSON object per event, machine-readable
//!
//! The subscriber is only initialised when a filter variable is set, so
//! there is zero overhead in normal use.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse from the `TSORIGIN_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        match std::env::var("TSORIGIN_LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Build an `EnvFilter` from `TSORIGIN_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("TSORIGIN_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `TSORIGIN_LOG` nor `RUST_LOG` is set. All
/// output goes to stderr so it never interferes with a host's stdout.
pub fn init_tracing() {
    let has_tsorigin_log = std::env::var("TSORIGIN_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_tsorigin_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
