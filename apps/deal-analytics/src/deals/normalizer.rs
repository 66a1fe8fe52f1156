//! Raw deal rows → canonical closed trades.
//!
//! Only closing deals (OUT, INOUT, OUT_BY) realize profit, so everything else
//! is dropped here. A batch containing a malformed row is rejected as a whole
//! and normalizes to an empty sequence; downstream code treats that as the
//! ordinary empty case.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::entry::DealEntry;
use super::raw::RawDeal;
use super::record::TradeRecord;

/// Reasons a raw row cannot be normalized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedDeal {
    /// Timestamp outside the representable range.
    #[error("deal {ticket}: timestamp {time} out of range")]
    TimestampOutOfRange {
        /// Offending ticket.
        ticket: i64,
        /// Raw epoch seconds.
        time: i64,
    },

    /// A monetary field is NaN or infinite.
    #[error("deal {ticket}: non-finite {field}")]
    NonFiniteAmount {
        /// Offending ticket.
        ticket: i64,
        /// Field name.
        field: &'static str,
    },
}

/// Normalize one row. `Ok(None)` means the row is valid but not a closing deal.
pub fn normalize_row(row: &RawDeal) -> Result<Option<TradeRecord>, MalformedDeal> {
    for (field, value) in [
        ("profit", row.profit),
        ("commission", row.commission),
        ("swap", row.swap),
    ] {
        if !value.is_finite() {
            return Err(MalformedDeal::NonFiniteAmount {
                ticket: row.ticket,
                field,
            });
        }
    }

    let time: DateTime<Utc> =
        DateTime::from_timestamp(row.time, 0).ok_or(MalformedDeal::TimestampOutOfRange {
            ticket: row.ticket,
            time: row.time,
        })?;

    let Some(entry) = DealEntry::from_code(row.entry).filter(|e| e.is_closing()) else {
        return Ok(None);
    };

    Ok(Some(TradeRecord::new(
        row.ticket,
        time,
        row.symbol.clone(),
        row.magic,
        entry,
        row.profit,
        row.commission,
        row.swap,
    )))
}

/// Normalize a batch, preserving source order.
///
/// Returns an empty sequence when the input is empty or any row is malformed.
pub fn normalize(rows: &[RawDeal]) -> Vec<TradeRecord> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut trades = Vec::with_capacity(rows.len());
    for row in rows {
        match normalize_row(row) {
            Ok(Some(trade)) => trades.push(trade),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, rows = rows.len(), "Malformed deal batch, treating as empty");
                return Vec::new();
            }
        }
    }

    let magics: HashSet<i64> = trades.iter().map(TradeRecord::magic).collect();
    let manual = trades.iter().filter(|t| t.ea_id().is_manual()).count();
    tracing::info!(
        rows = rows.len(),
        trades = trades.len(),
        magic_numbers = magics.len(),
        manual_trades = manual,
        "Normalized deal history"
    );

    trades
}
