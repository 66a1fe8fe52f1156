//! Numeric constants for performance metric calculations.

/// Magnitude below which a denominator or variance is treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Trading days per year used to annualize the Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Minimum distinct trading days before a Sharpe ratio is meaningful.
pub const MIN_DAYS_FOR_SHARPE: usize = 30;

/// Percent scale.
pub const HUNDRED: f64 = 100.0;

/// Runs test needs at least this many observations.
pub const MIN_RUNS_OBSERVATIONS: usize = 2;
