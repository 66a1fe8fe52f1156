//! Metrics cache configuration.

use serde::{Deserialize, Serialize};

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable memoization of computed metrics.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Stop inserting after this many entries. Unbounded when absent.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: None,
        }
    }
}

pub(super) const fn default_true() -> bool {
    true
}
