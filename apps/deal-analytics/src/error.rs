//! Top-level error type for deal analytics.
//!
//! Component errors (`ConfigError`, `SourceError`, `MetricsError`,
//! `TelemetryError`) convert into [`AnalyticsError`], which carries a stable
//! [`ErrorCode`] for adapters that report failures to clients.
//!
//! | Code | Cause |
//! |------|-------|
//! | `INVALID_CONFIG` | Config file unreadable, unparseable or invalid |
//! | `INVALID_REQUEST` | Bad filter or window arguments |
//! | `SOURCE_UNAVAILABLE` | Deal source could not be read |
//! | `SOURCE_DECODE` | Deal source returned malformed rows |
//! | `METRICS_FAILED` | Non-finite data under the fail-open policy |
//! | `TELEMETRY_FAILED` | Tracing could not be initialized |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::deals::SourceError;
use crate::metrics::MetricsError;
use crate::telemetry::TelemetryError;

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Configuration could not be loaded.
    InvalidConfig,
    /// Request arguments were invalid.
    InvalidRequest,
    /// Deal source failed.
    SourceUnavailable,
    /// Deal source payload was malformed.
    SourceDecode,
    /// Metrics computation failed.
    MetricsFailed,
    /// Tracing setup failed.
    TelemetryFailed,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::SourceUnavailable => "SOURCE_UNAVAILABLE",
            Self::SourceDecode => "SOURCE_DECODE",
            Self::MetricsFailed => "METRICS_FAILED",
            Self::TelemetryFailed => "TELEMETRY_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Any failure surfaced by the analytics pipeline.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Deal source error.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Metrics error.
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Tracing setup error.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// Invalid request arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AnalyticsError {
    /// Invalid request arguments.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Config(_) => ErrorCode::InvalidConfig,
            Self::Source(SourceError::Decode(_)) => ErrorCode::SourceDecode,
            Self::Source(_) => ErrorCode::SourceUnavailable,
            Self::Metrics(_) => ErrorCode::MetricsFailed,
            Self::Telemetry(_) => ErrorCode::TelemetryFailed,
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
        }
    }

    /// Serializable error body.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().reason().to_string(),
            message: self.to_string(),
        }
    }
}

/// Error body for API and CLI adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}
