//! Net profit by day of week and hour of close (UTC).

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::Serialize;

use crate::deals::TradeRecord;

/// One weekday × hour cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    /// Day of week.
    pub weekday: Weekday,
    /// Hour of day, 0..=23.
    pub hour: u32,
    /// Summed net profit.
    pub net_profit: f64,
    /// Trades closed in the cell.
    pub trades: usize,
}

/// Cells with at least one trade, Monday first, then by hour.
#[must_use]
pub fn weekday_hour_heatmap(trades: &[TradeRecord]) -> Vec<HeatmapCell> {
    let mut cells: BTreeMap<(u32, u32), HeatmapCell> = BTreeMap::new();
    for trade in trades {
        let weekday = trade.weekday();
        let hour = trade.hour();
        let cell = cells
            .entry((weekday.num_days_from_monday(), hour))
            .or_insert(HeatmapCell {
                weekday,
                hour,
                net_profit: 0.0,
                trades: 0,
            });
        cell.net_profit += trade.net_profit();
        cell.trades += 1;
    }
    cells.into_values().collect()
}
