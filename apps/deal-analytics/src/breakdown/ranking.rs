//! Best and worst individual trades.

use serde::Serialize;

use crate::deals::TradeRecord;

/// Default number of trades on each side of the ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// The N best and N worst trades by net profit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopTrades {
    /// Largest net profit first.
    pub best: Vec<TradeRecord>,
    /// Smallest net profit first.
    pub worst: Vec<TradeRecord>,
}

/// Rank trades by net profit. Ties keep their original order.
#[must_use]
pub fn top_trades(trades: &[TradeRecord], n: usize) -> TopTrades {
    let mut ascending: Vec<&TradeRecord> = trades.iter().collect();
    ascending.sort_by(|a, b| a.net_profit().total_cmp(&b.net_profit()));

    let mut descending: Vec<&TradeRecord> = trades.iter().collect();
    descending.sort_by(|a, b| b.net_profit().total_cmp(&a.net_profit()));

    TopTrades {
        best: descending.into_iter().take(n).cloned().collect(),
        worst: ascending.into_iter().take(n).cloned().collect(),
    }
}
