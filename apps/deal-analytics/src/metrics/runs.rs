//! Wald–Wolfowitz runs test on the win/non-win sequence.
//!
//! |z| above ~2 suggests the ordering of wins and losses is not random at
//! roughly 95% confidence. Large positive z means more alternation than
//! chance (wins and losses tend to follow each other); large negative z means
//! clustering (streaky results).

use serde::{Deserialize, Serialize};

use super::constants::{EPSILON, MIN_RUNS_OBSERVATIONS};

/// Outcome of a runs test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunsTest {
    /// Number of observations.
    pub observations: usize,
    /// Winning observations (`> 0`).
    pub wins: usize,
    /// Non-winning observations (`<= 0`).
    pub losses: usize,
    /// Maximal same-outcome subsequences observed.
    pub runs: usize,
    /// Runs expected under randomness.
    pub expected_runs: f64,
    /// Variance of the run count under randomness.
    pub variance: f64,
    /// Standardized deviation of the observed run count.
    pub z_score: f64,
}

impl RunsTest {
    /// Run the test. `None` when it is not applicable: fewer than two
    /// observations, no wins, no losses, or a degenerate variance.
    #[must_use]
    pub fn from_returns(returns: &[f64]) -> Option<Self> {
        let n = returns.len();
        if n < MIN_RUNS_OBSERVATIONS {
            return None;
        }

        let wins = returns.iter().filter(|&&r| r > 0.0).count();
        let losses = n - wins;
        if wins == 0 || losses == 0 {
            return None;
        }

        let runs = 1 + returns
            .windows(2)
            .filter(|w| (w[0] > 0.0) != (w[1] > 0.0))
            .count();

        let n_f = n as f64;
        let product = 2.0 * wins as f64 * losses as f64;
        let expected_runs = product / n_f + 1.0;
        let variance = (product * (product - n_f)) / (n_f * n_f * (n_f - 1.0));
        if variance <= EPSILON {
            return None;
        }

        Some(Self {
            observations: n,
            wins,
            losses,
            runs,
            expected_runs,
            variance,
            z_score: (runs as f64 - expected_runs) / variance.sqrt(),
        })
    }
}

/// Runs-test z-score, `None` when not applicable.
#[must_use]
pub fn runs_z_score(returns: &[f64]) -> Option<f64> {
    RunsTest::from_returns(returns).map(|t| t.z_score)
}
