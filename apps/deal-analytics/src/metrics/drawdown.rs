//! Peak-to-trough drawdown over a cumulative profit curve.

use serde::{Deserialize, Serialize};

/// Running peak and drawdown series for a return sequence.
///
/// With `cum[i] = returns[0] + … + returns[i]` and `peak[i] = max(cum[0..=i])`,
/// `drawdown[i] = peak[i] - cum[i]`. The peak starts at the first cumulative
/// value, not at zero, so a leading loss is not a drawdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    /// Cumulative profit after each return.
    pub cumulative: Vec<f64>,
    /// Running peak of the cumulative profit.
    pub peaks: Vec<f64>,
    /// Distance below the running peak, always ≥ 0.
    pub series: Vec<f64>,
    /// Largest value of `series`, 0 for an empty input.
    pub max_drawdown: f64,
}

impl Drawdown {
    /// Compute the drawdown series in one pass.
    #[must_use]
    pub fn from_returns(returns: &[f64]) -> Self {
        let mut cumulative = Vec::with_capacity(returns.len());
        let mut peaks = Vec::with_capacity(returns.len());
        let mut series = Vec::with_capacity(returns.len());
        let mut max_drawdown = 0.0_f64;

        let mut cum = 0.0_f64;
        let mut peak = f64::NEG_INFINITY;
        for &r in returns {
            cum += r;
            peak = peak.max(cum);
            let dd = peak - cum;
            max_drawdown = max_drawdown.max(dd);

            cumulative.push(cum);
            peaks.push(peak);
            series.push(dd);
        }

        Self {
            cumulative,
            peaks,
            series,
            max_drawdown,
        }
    }
}

/// Maximum drawdown of a return sequence.
#[must_use]
pub fn max_drawdown(returns: &[f64]) -> f64 {
    Drawdown::from_returns(returns).max_drawdown
}
