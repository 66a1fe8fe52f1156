//! Deal source configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Deal source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Upper bound on a single fetch, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl SourceConfig {
    /// Fetch timeout as a `Duration`.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

const fn default_fetch_timeout_ms() -> u64 {
    30_000
}
