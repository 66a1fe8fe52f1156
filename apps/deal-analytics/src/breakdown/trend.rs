//! Least-squares trend line through the equity curve.

use serde::Serialize;

/// `cumulative ≈ slope * index + intercept`, with `index` counted from 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    /// Change in cumulative net profit per trade.
    pub slope: f64,
    /// Fitted value at index 0.
    pub intercept: f64,
}

impl TrendLine {
    /// Fitted value at `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn at(&self, index: usize) -> f64 {
        self.slope.mul_add(index as f64, self.intercept)
    }
}

/// Fit a line to `values` over their positions. `None` with fewer than two points.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linear_trend(values: &[f64]) -> Option<TrendLine> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (covariance, variance) = values.iter().enumerate().fold((0.0, 0.0), |(cov, var), (i, &y)| {
        let dx = i as f64 - mean_x;
        (dx.mul_add(y - mean_y, cov), dx.mul_add(dx, var))
    });

    let slope = covariance / variance;
    Some(TrendLine {
        slope,
        intercept: slope.mul_add(-mean_x, mean_y),
    })
}
