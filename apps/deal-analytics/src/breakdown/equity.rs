//! Equity curve with drawdown at each point.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::deals::TradeRecord;
use crate::metrics::Drawdown;

/// One point of the cumulative net-profit curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    /// Position in the trade sequence, from 0.
    pub index: usize,
    /// Ticket of the trade closing at this point.
    pub ticket: i64,
    /// Close time.
    pub time: DateTime<Utc>,
    /// Net profit of this trade.
    pub net_profit: f64,
    /// Cumulative net profit including this trade.
    pub cumulative: f64,
    /// Distance below the running peak.
    pub drawdown: f64,
}

/// Cumulative net profit per trade, in trade order.
#[must_use]
pub fn equity_curve(trades: &[TradeRecord]) -> Vec<EquityPoint> {
    let returns: Vec<f64> = trades.iter().map(TradeRecord::net_profit).collect();
    let dd = Drawdown::from_returns(&returns);

    trades
        .iter()
        .zip(dd.cumulative.iter().zip(&dd.series))
        .enumerate()
        .map(|(index, (trade, (&cumulative, &drawdown)))| EquityPoint {
            index,
            ticket: trade.ticket(),
            time: trade.time(),
            net_profit: trade.net_profit(),
            cumulative,
            drawdown,
        })
        .collect()
}
