//! Trade subset selection by symbol, strategy, time window, weekday and hour.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::ea_id::EaId;
use super::record::TradeRecord;

/// Selection criteria. Empty lists and absent bounds match everything;
/// criteria are combined with AND; time bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    /// Instrument symbols to keep.
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Strategy grouping keys to keep.
    #[serde(default)]
    pub ea_ids: Vec<EaId>,
    /// Raw magic numbers to keep.
    #[serde(default)]
    pub magic_numbers: Vec<i64>,
    /// Earliest trade time.
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    /// Latest trade time.
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    /// Days of week (UTC) to keep.
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
    /// Hours of day (UTC, 0..=23) to keep.
    #[serde(default)]
    pub hours: Vec<u32>,
}

impl TradeFilter {
    /// Filter that keeps every trade.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to the given symbols.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given strategy keys.
    #[must_use]
    pub fn with_ea_ids(mut self, ea_ids: impl IntoIterator<Item = EaId>) -> Self {
        self.ea_ids = ea_ids.into_iter().collect();
        self
    }

    /// Restrict to the given magic numbers.
    #[must_use]
    pub fn with_magic_numbers(mut self, magics: impl IntoIterator<Item = i64>) -> Self {
        self.magic_numbers = magics.into_iter().collect();
        self
    }

    /// Restrict to an inclusive time window.
    #[must_use]
    pub fn with_window(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Restrict to trades closed on the given days of week.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Restrict to trades closed in the given hours of day.
    #[must_use]
    pub fn with_hours(mut self, hours: impl IntoIterator<Item = u32>) -> Self {
        self.hours = hours.into_iter().collect();
        self
    }

    /// Whether this filter keeps every trade.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.symbols.is_empty()
            && self.ea_ids.is_empty()
            && self.magic_numbers.is_empty()
            && self.from.is_none()
            && self.to.is_none()
            && self.weekdays.is_empty()
            && self.hours.is_empty()
    }

    /// Check a single trade against every criterion.
    #[must_use]
    pub fn matches(&self, trade: &TradeRecord) -> bool {
        (self.symbols.is_empty() || self.symbols.iter().any(|s| s == trade.symbol()))
            && (self.ea_ids.is_empty() || self.ea_ids.contains(&trade.ea_id()))
            && (self.magic_numbers.is_empty() || self.magic_numbers.contains(&trade.magic()))
            && self.from.is_none_or(|from| trade.time() >= from)
            && self.to.is_none_or(|to| trade.time() <= to)
            && (self.weekdays.is_empty() || self.weekdays.contains(&trade.weekday()))
            && (self.hours.is_empty() || self.hours.contains(&trade.hour()))
    }

    /// Apply to a trade sequence, preserving order.
    #[must_use]
    pub fn apply(&self, trades: &[TradeRecord]) -> Vec<TradeRecord> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Distinct symbols present, sorted.
#[must_use]
pub fn available_symbols(trades: &[TradeRecord]) -> Vec<String> {
    trades
        .iter()
        .map(|t| t.symbol().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct strategy keys present, sorted with `Manual` first.
#[must_use]
pub fn available_ea_ids(trades: &[TradeRecord]) -> Vec<EaId> {
    trades
        .iter()
        .map(TradeRecord::ea_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
