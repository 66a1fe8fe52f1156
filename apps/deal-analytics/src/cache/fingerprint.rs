//! Content fingerprint of a trade sequence.

use sha2::{Digest, Sha256};

use crate::deals::TradeRecord;

/// Fingerprint of the empty trade sequence.
pub const EMPTY_FINGERPRINT: &str = "empty";

/// SHA-256 over every field of every trade, in order, hex-encoded.
///
/// Floats are hashed by bit pattern and the symbol is length-prefixed, so
/// two sequences share a fingerprint only if their rows are identical.
#[must_use]
pub fn fingerprint(trades: &[TradeRecord]) -> String {
    if trades.is_empty() {
        return EMPTY_FINGERPRINT.to_string();
    }

    let mut hasher = Sha256::new();
    hasher.update((trades.len() as u64).to_le_bytes());
    for trade in trades {
        hasher.update(trade.ticket().to_le_bytes());
        hasher.update(trade.time().timestamp().to_le_bytes());
        hasher.update(trade.time().timestamp_subsec_nanos().to_le_bytes());
        hasher.update(trade.profit().to_bits().to_le_bytes());
        hasher.update(trade.commission().to_bits().to_le_bytes());
        hasher.update(trade.swap().to_bits().to_le_bytes());
        hasher.update(trade.magic().to_le_bytes());
        hasher.update(trade.entry().code().to_le_bytes());
        let symbol = trade.symbol().as_bytes();
        hasher.update((symbol.len() as u64).to_le_bytes());
        hasher.update(symbol);
    }
    hex::encode(hasher.finalize())
}
