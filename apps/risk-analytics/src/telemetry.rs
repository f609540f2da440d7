//! Logging setup for host binaries.
//!
//! The analytics core only emits `tracing` events; hosts call
//! [`init_logging`] once at startup. `RUST_LOG` takes precedence over the
//! configured level. Output goes to stderr so stdout stays free for the report.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Logging initialisation errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Rejected directive.
        filter: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format.as_str() {
        "pretty" => builder.pretty().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder
            .json()
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .try_init(),
    };

    result.map_err(|e| TelemetryError::Init(e.to_string()))
}

/// `RUST_LOG` if set and valid, otherwise the configured level.
fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|e| TelemetryError::InvalidFilter {
            filter: level.to_string(),
            message: e.to_string(),
        })
    })
}
