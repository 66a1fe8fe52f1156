//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for command output. `RUST_LOG`
//! directives are honoured; the configured level applies to this crate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use deal_analytics::{config::LoggingConfig, telemetry::init_tracing};
//!
//! init_tracing(&LoggingConfig::default())?;
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, ParseError};

use crate::config::{LogFormat, LoggingConfig};

/// Errors from tracing initialization.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level does not form a valid filter directive.
    #[error("Invalid log directive '{directive}': {source}")]
    InvalidDirective {
        /// The rejected directive.
        directive: String,
        /// The underlying parse error.
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let directive = crate_directive(config.level.as_str())?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder
            .json()
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .try_init(),
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

fn crate_directive(level: &str) -> Result<Directive, TelemetryError> {
    let directive = format!("deal_analytics={}", level.to_ascii_lowercase());
    directive
        .parse()
        .map_err(|source| TelemetryError::InvalidDirective { directive, source })
}
