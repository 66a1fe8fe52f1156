//! Longest runs of consecutive winning or non-winning trades.

/// Longest run where `(value > 0) == want_win`.
///
/// Breakeven trades count as non-wins, so they extend a losing streak.
#[must_use]
pub fn max_consecutive(returns: &[f64], want_win: bool) -> usize {
    let mut max_run = 0usize;
    let mut current = 0usize;

    for &value in returns {
        if (value > 0.0) == want_win {
            current += 1;
            max_run = max_run.max(current);
        } else {
            current = 0;
        }
    }

    max_run
}
