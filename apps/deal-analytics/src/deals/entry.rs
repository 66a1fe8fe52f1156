//! Deal entry direction as reported by the trading terminal.

use serde::{Deserialize, Serialize};

/// Direction of a deal relative to its position.
///
/// Terminal codes: `0` IN, `1` OUT, `2` INOUT (reversal), `3` OUT_BY
/// (closed by an opposite position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealEntry {
    /// Opens or adds to a position.
    In,
    /// Closes or reduces a position.
    Out,
    /// Reverses a position.
    InOut,
    /// Closed by an opposite position.
    OutBy,
}

impl DealEntry {
    /// Map a terminal entry code. Unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::In),
            1 => Some(Self::Out),
            2 => Some(Self::InOut),
            3 => Some(Self::OutBy),
            _ => None,
        }
    }

    /// Terminal entry code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::In => 0,
            Self::Out => 1,
            Self::InOut => 2,
            Self::OutBy => 3,
        }
    }

    /// Whether the deal realizes profit or loss on a position.
    #[must_use]
    pub const fn is_closing(self) -> bool {
        matches!(self, Self::Out | Self::InOut | Self::OutBy)
    }
}
