//! Daily profit series with a trailing moving average.

use chrono::NaiveDate;
use serde::Serialize;

use crate::deals::TradeRecord;
use crate::metrics::daily_returns;

/// Trailing window of the daily moving average.
pub const MOVING_AVERAGE_DAYS: usize = 7;

/// Net profit for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Summed net profit of the day.
    pub profit: f64,
    /// Trailing mean over up to [`MOVING_AVERAGE_DAYS`] days, present only
    /// when the series spans at least that many days.
    pub moving_average: Option<f64>,
}

/// Daily profit in date order.
///
/// The average window shrinks at the start of the series, so the first
/// point averages one day, the second two, and so on up to the full window.
#[must_use]
pub fn daily_series(trades: &[TradeRecord]) -> Vec<DailyPoint> {
    let days: Vec<(NaiveDate, f64)> = daily_returns(trades).into_iter().collect();
    let with_average = days.len() >= MOVING_AVERAGE_DAYS;

    days.iter()
        .enumerate()
        .map(|(i, &(date, profit))| {
            let moving_average = with_average.then(|| {
                let start = (i + 1).saturating_sub(MOVING_AVERAGE_DAYS);
                let window = &days[start..=i];
                window.iter().map(|(_, p)| p).sum::<f64>() / window.len() as f64
            });
            DailyPoint {
                date,
                profit,
                moving_average,
            }
        })
        .collect()
}
