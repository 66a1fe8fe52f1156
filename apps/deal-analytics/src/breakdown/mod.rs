//! Dashboard series derived from a trade sequence.
//!
//! These are the data behind the equity (with trend line), daily, session,
//! weekday × hour and top-trade charts. Nothing here plots; adapters render the series as they see fit.

mod daily;
mod equity;
mod heatmap;
mod ranking;
mod session;
mod trend;

pub use daily::{DailyPoint, MOVING_AVERAGE_DAYS, daily_series};
pub use equity::{EquityPoint, equity_curve};
pub use heatmap::{HeatmapCell, weekday_hour_heatmap};
pub use ranking::{DEFAULT_TOP_N, TopTrades, top_trades};
pub use session::{Session, SessionStats, session_breakdown};
pub use trend::{TrendLine, linear_trend};

use std::fmt::Write;

use serde::Serialize;

use crate::deals::TradeRecord;
use crate::metrics::{format_money, format_ratio};

/// All dashboard series for one trade sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown {
    /// Cumulative net profit per trade.
    pub equity: Vec<EquityPoint>,
    /// Least-squares fit of the equity curve; absent below two trades.
    pub trend: Option<TrendLine>,
    /// Net profit per day.
    pub daily: Vec<DailyPoint>,
    /// Net profit per session.
    pub sessions: Vec<SessionStats>,
    /// Net profit per weekday × hour cell.
    pub heatmap: Vec<HeatmapCell>,
    /// Best and worst trades.
    pub top: TopTrades,
}

impl Breakdown {
    /// Build every series, ranking `top_n` trades on each side.
    #[must_use]
    pub fn from_trades(trades: &[TradeRecord], top_n: usize) -> Self {
        let equity = equity_curve(trades);
        let cumulative: Vec<f64> = equity.iter().map(|p| p.cumulative).collect();
        Self {
            trend: linear_trend(&cumulative),
            equity,
            daily: daily_series(trades),
            sessions: session_breakdown(trades),
            heatmap: weekday_hour_heatmap(trades),
            top: top_trades(trades, top_n),
        }
    }

    /// Plain-text rendering for terminal reports.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(trend) = self.trend {
            let _ = writeln!(out, "Equity Trend");
            let _ = writeln!(out, "------------");
            let _ = writeln!(
                out,
                "{} per trade (intercept {})\n",
                format_money(trend.slope),
                format_money(trend.intercept),
            );
        }

        let _ = writeln!(out, "Daily Results");
        let _ = writeln!(out, "-------------");
        for point in &self.daily {
            let _ = writeln!(
                out,
                "{}  {:>12}  MA7 {:>10}",
                point.date,
                format_money(point.profit),
                format_ratio(point.moving_average),
            );
        }

        let _ = writeln!(out, "\nSessions");
        let _ = writeln!(out, "--------");
        for stats in &self.sessions {
            let _ = writeln!(
                out,
                "{:<20}{:>12}  ({} trades)",
                stats.session.label(),
                format_money(stats.net_profit),
                stats.trades,
            );
        }

        let _ = writeln!(out, "\nWeekday x Hour");
        let _ = writeln!(out, "--------------");
        for cell in &self.heatmap {
            let _ = writeln!(
                out,
                "{} {:02}h{:>12}  ({} trades)",
                cell.weekday,
                cell.hour,
                format_money(cell.net_profit),
                cell.trades,
            );
        }

        let _ = writeln!(out, "\nBest Trades");
        let _ = writeln!(out, "-----------");
        for trade in &self.top.best {
            let _ = writeln!(out, "#{:<12}{:<10}{:>12}", trade.ticket(), trade.symbol(), format_money(trade.net_profit()));
        }

        let _ = writeln!(out, "\nWorst Trades");
        let _ = writeln!(out, "------------");
        for trade in &self.top.worst {
            let _ = writeln!(out, "#{:<12}{:<10}{:>12}", trade.ticket(), trade.symbol(), format_money(trade.net_profit()));
        }

        out
    }
}
