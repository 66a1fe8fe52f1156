//! Metrics engine configuration.

use serde::{Deserialize, Serialize};

use crate::breakdown::DEFAULT_TOP_N;
use crate::metrics::{EngineSettings, FailurePolicy, MIN_DAYS_FOR_SHARPE, TRADING_DAYS_PER_YEAR};

/// Analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Distinct trading days required before the Sharpe ratio is reported.
    #[serde(default = "default_min_days_for_sharpe")]
    pub min_days_for_sharpe: usize,
    /// Sharpe annualization factor.
    #[serde(default = "default_annualization_days")]
    pub annualization_days: u32,
    /// Behaviour when computation hits non-finite data.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Trades listed on each side of the best/worst ranking.
    #[serde(default = "default_top_trades")]
    pub top_trades: usize,
}

impl AnalysisConfig {
    /// Engine settings derived from this section.
    #[must_use]
    pub const fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            min_days_for_sharpe: self.min_days_for_sharpe,
            annualization_days: self.annualization_days,
            failure_policy: self.failure_policy,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_days_for_sharpe: default_min_days_for_sharpe(),
            annualization_days: default_annualization_days(),
            failure_policy: FailurePolicy::default(),
            top_trades: default_top_trades(),
        }
    }
}

const fn default_min_days_for_sharpe() -> usize {
    MIN_DAYS_FOR_SHARPE
}

const fn default_annualization_days() -> u32 {
    TRADING_DAYS_PER_YEAR
}

const fn default_top_trades() -> usize {
    DEFAULT_TOP_N
}
