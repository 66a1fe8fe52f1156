//! Profit grouped by trading session (hour of close, UTC).

use std::fmt;

use serde::Serialize;

use crate::deals::TradeRecord;

/// Session of the day a trade closed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    /// [06:00, 12:00)
    Morning,
    /// [12:00, 18:00)
    Afternoon,
    /// [18:00, 06:00)
    Night,
}

impl Session {
    /// Session containing the given hour.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Night,
        }
    }

    /// Display label with hour range.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning (06-12h)",
            Self::Afternoon => "Afternoon (12-18h)",
            Self::Night => "Night (18-06h)",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Totals for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    /// Session.
    pub session: Session,
    /// Summed net profit.
    pub net_profit: f64,
    /// Trades closed in the session.
    pub trades: usize,
}

/// Per-session totals for sessions with at least one trade, in day order.
#[must_use]
pub fn session_breakdown(trades: &[TradeRecord]) -> Vec<SessionStats> {
    [Session::Morning, Session::Afternoon, Session::Night]
        .into_iter()
        .filter_map(|session| {
            let in_session = trades
                .iter()
                .filter(|t| Session::from_hour(t.hour()) == session);
            let (net_profit, count) =
                in_session.fold((0.0, 0usize), |(sum, n), t| (sum + t.net_profit(), n + 1));
            (count > 0).then_some(SessionStats {
                session,
                net_profit,
                trades: count,
            })
        })
        .collect()
}
