//! Deal ingestion: raw terminal rows → canonical closed trades.
//!
//! - `raw`: rows as the connector delivers them
//! - `entry`, `ea_id`: the two business-rule mappings (closing filter, strategy key)
//! - `record`: the immutable `TradeRecord`
//! - `normalizer`: raw rows → trades
//! - `filter`: subset selection for the metrics path
//! - `source`: async port for fetching raw rows

mod ea_id;
mod entry;
mod filter;
mod normalizer;
mod raw;
mod record;
mod source;

pub use ea_id::{EaId, MAGIC_PREFIX, MANUAL_LABEL};
pub use entry::DealEntry;
pub use filter::{TradeFilter, available_ea_ids, available_symbols};
pub use normalizer::{MalformedDeal, normalize, normalize_row};
pub use raw::{RawDeal, parse_raw_deals, try_parse_raw_deals};
pub use record::TradeRecord;
pub use source::{
    DealSource, FetchWindow, InMemoryDealSource, JsonFileDealSource, SourceError,
    fetch_with_timeout, try_fetch_with_timeout,
};
