//! Daily profit aggregation and the annualized Sharpe ratio.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::constants::EPSILON;
use super::math::{mean, sample_std_dev};
use crate::deals::TradeRecord;

/// Net profit summed per calendar day (UTC), in date order.
#[must_use]
pub fn daily_returns(trades: &[TradeRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for trade in trades {
        *days.entry(trade.date()).or_insert(0.0) += trade.net_profit();
    }
    days
}

/// Annualized Sharpe ratio of daily returns.
///
/// Sharpe = mean / sample std-dev × √`annualization_days`.
/// `None` when fewer than `min_days` days are present or the standard
/// deviation is effectively zero, so "no data" never reads as a real 0.
#[must_use]
pub fn annualized_sharpe(daily: &[f64], min_days: usize, annualization_days: u32) -> Option<f64> {
    if daily.len() < min_days {
        return None;
    }

    let avg = mean(daily)?;
    let std = sample_std_dev(daily)?;
    if std < EPSILON {
        return None;
    }

    Some(avg / std * f64::from(annualization_days).sqrt())
}
