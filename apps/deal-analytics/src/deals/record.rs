//! Canonical closed-trade record.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::Serialize;

use super::ea_id::EaId;
use super::entry::DealEntry;

/// One closed trade, immutable once built.
///
/// `net_profit` and `ea_id` are derived at construction and cannot drift
/// from the fields they are computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    ticket: i64,
    time: DateTime<Utc>,
    symbol: String,
    magic: i64,
    entry: DealEntry,
    profit: f64,
    commission: f64,
    swap: f64,
    net_profit: f64,
    ea_id: EaId,
}

impl TradeRecord {
    /// Build a record, deriving `net_profit = profit + commission + swap` and `ea_id`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ticket: i64,
        time: DateTime<Utc>,
        symbol: impl Into<String>,
        magic: i64,
        entry: DealEntry,
        profit: f64,
        commission: f64,
        swap: f64,
    ) -> Self {
        Self {
            ticket,
            time,
            symbol: symbol.into(),
            magic,
            entry,
            profit,
            commission,
            swap,
            net_profit: profit + commission + swap,
            ea_id: EaId::from_magic(magic),
        }
    }

    /// Deal ticket.
    #[must_use]
    pub const fn ticket(&self) -> i64 {
        self.ticket
    }

    /// Execution time.
    #[must_use]
    pub const fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Calendar date (UTC) used for daily aggregation.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.time.date_naive()
    }

    /// Hour of day (UTC), 0..=23.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Day of week (UTC).
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.time.weekday()
    }

    /// Instrument symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Strategy magic number.
    #[must_use]
    pub const fn magic(&self) -> i64 {
        self.magic
    }

    /// Entry direction.
    #[must_use]
    pub const fn entry(&self) -> DealEntry {
        self.entry
    }

    /// Gross realized profit.
    #[must_use]
    pub const fn profit(&self) -> f64 {
        self.profit
    }

    /// Commission.
    #[must_use]
    pub const fn commission(&self) -> f64 {
        self.commission
    }

    /// Swap.
    #[must_use]
    pub const fn swap(&self) -> f64 {
        self.swap
    }

    /// Profit after commission and swap.
    #[must_use]
    pub const fn net_profit(&self) -> f64 {
        self.net_profit
    }

    /// Strategy grouping key.
    #[must_use]
    pub const fn ea_id(&self) -> EaId {
        self.ea_id
    }

    /// Check if this trade was profitable.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.net_profit > 0.0
    }
}
