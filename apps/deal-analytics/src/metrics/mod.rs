//! Performance metrics over a sequence of closed trades.
//!
//! Implements:
//! - Profit factor, win rate, expectancy and cost totals
//! - Annualized Sharpe ratio of daily returns
//! - Maximum drawdown and recovery factor
//! - Wald–Wolfowitz runs z-score of the win/loss ordering
//! - Longest winning and losing streaks

mod constants;
mod daily;
mod drawdown;
mod engine;
mod format;
mod math;
mod runs;
mod streaks;
mod types;

pub use constants::{EPSILON, MIN_DAYS_FOR_SHARPE, TRADING_DAYS_PER_YEAR};
pub use daily::{annualized_sharpe, daily_returns};
pub use drawdown::{Drawdown, max_drawdown};
pub use engine::{EngineSettings, FailurePolicy, MetricsEngine, MetricsError};
pub use format::{format_money, format_pct, format_profit_factor, format_ratio};
pub use math::{mean, sample_std_dev};
pub use runs::{RunsTest, runs_z_score};
pub use streaks::max_consecutive;
pub use types::{AdvancedMetrics, ExtremeMetrics, GeneralMetrics, MetricsResult, SequenceMetrics};
