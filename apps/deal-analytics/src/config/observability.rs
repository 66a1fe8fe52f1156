//! Logging configuration.
//!
//! Levels and formats are closed sets, so a typo in the config file fails
//! at parse time rather than silently falling back to a default.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cache::default_true;

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Level applied to this crate's events. `RUST_LOG` can still widen other targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-trade cache lookups.
    Trace,
    /// Cache hits and misses, filter sizes.
    Debug,
    /// One line per fetch and per analysis.
    #[default]
    Info,
    /// Degraded results: timeouts, malformed batches, zeroed metrics.
    Warn,
    /// Source failures only.
    Error,
}

impl LogLevel {
    /// Directive spelling of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for `deal_analytics` events.
    #[serde(default)]
    pub level: LogLevel,
    /// Output encoding.
    #[serde(default)]
    pub format: LogFormat,
    /// Include span information in JSON output.
    #[serde(default = "default_true")]
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            include_spans: true,
        }
    }
}
