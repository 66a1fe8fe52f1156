//! Strategy grouping key derived from the deal magic number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label shared by every trade placed by hand (magic number 0).
pub const MANUAL_LABEL: &str = "Manual";

/// Prefix of the label for trades placed by an expert advisor.
pub const MAGIC_PREFIX: &str = "M:";

/// Grouping key identifying a trading strategy or manual trading.
///
/// Serialized as its label: `"Manual"` or `"M:<magic>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EaId {
    /// All trades with magic number 0.
    Manual,
    /// One expert advisor, keyed by its non-zero magic number.
    Magic(i64),
}

impl EaId {
    /// Derive the grouping key for a magic number.
    #[must_use]
    pub const fn from_magic(magic: i64) -> Self {
        if magic == 0 {
            Self::Manual
        } else {
            Self::Magic(magic)
        }
    }

    /// Parse a label produced by [`EaId::label`].
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        if label == MANUAL_LABEL {
            return Some(Self::Manual);
        }
        let magic: i64 = label.strip_prefix(MAGIC_PREFIX)?.parse().ok()?;
        (magic != 0).then_some(Self::Magic(magic))
    }

    /// Canonical string label.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Whether this key groups manual trades.
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        matches!(self, Self::Manual)
    }
}

impl fmt::Display for EaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => f.write_str(MANUAL_LABEL),
            Self::Magic(magic) => write!(f, "{MAGIC_PREFIX}{magic}"),
        }
    }
}

impl Serialize for EaId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EaId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid ea_id label: {label}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_zero_magic_is_manual() {
        assert_eq!(EaId::from_magic(0), EaId::Manual);
        assert!(EaId::from_magic(0).is_manual());
    }

    #[test]
    fn test_nonzero_magic_is_expert_advisor() {
        assert_eq!(EaId::from_magic(102_030), EaId::Magic(102_030));
        assert!(!EaId::from_magic(102_030).is_manual());
    }

    #[test_case(0, "Manual")]
    #[test_case(102_030, "M:102030")]
    #[test_case(-7, "M:-7")]
    fn test_label(magic: i64, expected: &str) {
        assert_eq!(EaId::from_magic(magic).label(), expected);
    }

    #[test_case("Manual", Some(EaId::Manual))]
    #[test_case("M:42", Some(EaId::Magic(42)))]
    #[test_case("M:0", None ; "zero magic is not an advisor")]
    #[test_case("EA 42", None ; "legacy label")]
    #[test_case("M:abc", None ; "non numeric")]
    fn test_parse(label: &str, expected: Option<EaId>) {
        assert_eq!(EaId::parse(label), expected);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&EaId::Magic(5)).unwrap();
        assert_eq!(json, "\"M:5\"");
        let back: EaId = serde_json::from_str("\"Manual\"").unwrap();
        assert_eq!(back, EaId::Manual);
    }

    #[test]
    fn test_manual_sorts_first() {
        let mut ids = vec![EaId::Magic(3), EaId::Manual, EaId::Magic(1)];
        ids.sort();
        assert_eq!(ids, vec![EaId::Manual, EaId::Magic(1), EaId::Magic(3)]);
    }
}
