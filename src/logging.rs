//! Structured logging setup.
//!
//! One JSON object per event, written to stderr so stdout stays free for
//! responses. `RUST_LOG` takes precedence over the configured filter.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, SkillError};

/// Build the filter: `RUST_LOG` if set and valid, else `default_filter`.
#[must_use]
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| SkillError::Config(format!("logging already initialized: {e}")))
}
