//! Statistical math utilities for performance metric calculations.

/// Calculate mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (divisor `n - 1`). Needs at least two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    Some((variance_sum / (values.len() - 1) as f64).sqrt())
}

/// Largest value, `None` for an empty slice.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Smallest value, `None` for an empty slice.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}
