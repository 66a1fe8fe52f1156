//! Configuration loading, validation, and environment variable interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use deal_analytics::config::load_config;
//!
//! // Default path (deal-analytics.yaml); a missing file yields defaults
//! let config = load_config(None)?;
//!
//! // Explicit path; a missing file is an error
//! let config = load_config(Some("ops/analytics.yaml"))?;
//!
//! println!("Sharpe needs {} days", config.analysis.min_days_for_sharpe);
//! ```

mod analysis;
mod cache;
mod observability;
mod source;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use analysis::AnalysisConfig;
pub use cache::CacheConfig;
pub use observability::{LogFormat, LogLevel, LoggingConfig, ObservabilityConfig};
pub use source::SourceConfig;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "deal-analytics.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Metrics engine configuration.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Metrics cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Deal source configuration.
    #[serde(default)]
    pub source: SourceConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// With `path = None`, reads [`DEFAULT_CONFIG_PATH`] and falls back to
/// defaults if that file does not exist. An explicit path must exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (DEFAULT_CONFIG_PATH, false),
    };

    if !required && !Path::new(path).exists() {
        tracing::debug!(path, "No config file, using defaults");
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    // An empty document parses as unit, not as a mapping.
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.analysis.min_days_for_sharpe < 2 {
        return Err(ConfigError::ValidationError(
            "analysis.min_days_for_sharpe must be at least 2".to_string(),
        ));
    }

    if config.analysis.annualization_days == 0 {
        return Err(ConfigError::ValidationError(
            "analysis.annualization_days must be positive".to_string(),
        ));
    }

    if config.analysis.top_trades == 0 {
        return Err(ConfigError::ValidationError(
            "analysis.top_trades must be positive".to_string(),
        ));
    }

    if config.cache.max_entries == Some(0) {
        return Err(ConfigError::ValidationError(
            "cache.max_entries must be positive when set".to_string(),
        ));
    }

    if config.source.fetch_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "source.fetch_timeout_ms must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FailurePolicy;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.analysis.min_days_for_sharpe, 30);
        assert_eq!(config.analysis.annualization_days, 252);
        assert_eq!(config.analysis.failure_policy, FailurePolicy::FailClosed);
        assert_eq!(config.analysis.top_trades, 10);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_entries, None);
        assert_eq!(config.source.fetch_timeout_ms, 30_000);
        assert_eq!(config.observability.logging.level, LogLevel::Info);
        assert_eq!(config.observability.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_empty_config() {
        let config = match load_config_from_string("") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.analysis.min_days_for_sharpe, 30);
    }

    #[test]
    fn test_load_minimal_config() {
        let yaml = r"
analysis:
  failure_policy: fail_open
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.analysis.failure_policy, FailurePolicy::FailOpen);
        assert_eq!(config.analysis.annualization_days, 252); // Default value
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "level: ${DEAL_ANALYTICS_TEST_NONEXISTENT_VAR:-debug}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "level: debug");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "token: ${DEAL_ANALYTICS_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "token: ");
    }

    #[test]
    fn test_validation_min_days() {
        let yaml = r"
analysis:
  min_days_for_sharpe: 1
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for min_days_for_sharpe");
        };
        assert!(err.to_string().contains("min_days_for_sharpe"));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let yaml = r"
source:
  fetch_timeout_ms: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero timeout");
        };
        assert!(err.to_string().contains("fetch_timeout_ms"));
    }

    #[test]
    fn test_validation_zero_cache_cap() {
        let yaml = r"
cache:
  max_entries: 0
";

        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_unknown_log_format_is_parse_error() {
        let yaml = r"
observability:
  logging:
    format: xml
";

        let Err(ConfigError::ParseError(err)) = load_config_from_string(yaml) else {
            panic!("expected parse error for unknown format");
        };
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_unknown_log_level_is_parse_error() {
        let yaml = r"
observability:
  logging:
    level: verbose
";

        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_failure_policy_is_parse_error() {
        let yaml = r"
analysis:
  failure_policy: maybe
";

        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
analysis:
  min_days_for_sharpe: 20
  annualization_days: 365
  failure_policy: fail_open
  top_trades: 5

cache:
  enabled: false
  max_entries: 128

source:
  fetch_timeout_ms: 5000

observability:
  logging:
    level: "debug"
    format: "pretty"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.analysis.min_days_for_sharpe, 20);
        assert_eq!(config.analysis.engine_settings().annualization_days, 365);
        assert_eq!(config.analysis.top_trades, 5);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_entries, Some(128));
        assert_eq!(config.source.fetch_timeout().as_millis(), 5000);
        assert_eq!(config.observability.logging.level, LogLevel::Debug);
        assert_eq!(config.observability.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let Err(ConfigError::ReadError { .. }) = load_config(missing.to_str()) else {
            panic!("explicit missing path should be a read error");
        };
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deal-analytics.yaml");
        std::fs::write(&path, "cache:\n  max_entries: 4\n").unwrap();
        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.cache.max_entries, Some(4));
    }
}
