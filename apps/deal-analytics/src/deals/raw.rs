//! Raw deal rows as delivered by the trading-terminal connector.

use serde::{Deserialize, Serialize};

/// One row of deal history, before normalization.
///
/// `time` is in epoch seconds. Fields the metrics never read are kept
/// optional so exports from different connector versions still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDeal {
    /// Deal ticket, unique within the source data.
    pub ticket: i64,
    /// Order ticket that produced the deal.
    #[serde(default)]
    pub order: i64,
    /// Execution time in epoch seconds.
    pub time: i64,
    /// Entry direction code (0 IN, 1 OUT, 2 INOUT, 3 OUT_BY).
    pub entry: i64,
    /// Strategy identifier, 0 for manual trades.
    #[serde(default)]
    pub magic: i64,
    /// Position the deal belongs to.
    #[serde(default)]
    pub position_id: i64,
    /// Traded volume in lots.
    #[serde(default)]
    pub volume: f64,
    /// Execution price.
    #[serde(default)]
    pub price: f64,
    /// Realized profit.
    pub profit: f64,
    /// Commission charged.
    #[serde(default)]
    pub commission: f64,
    /// Swap (financing) charged.
    #[serde(default)]
    pub swap: f64,
    /// Instrument symbol.
    pub symbol: String,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

/// Parse a JSON array of raw deals.
pub fn try_parse_raw_deals(json: &str) -> Result<Vec<RawDeal>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse a JSON array of raw deals, degrading to an empty list on malformed input.
pub fn parse_raw_deals(json: &str) -> Vec<RawDeal> {
    match try_parse_raw_deals(json) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed deal payload, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_row() {
        let json = r#"[{"ticket": 1, "time": 1704103200, "entry": 1, "profit": 12.5, "symbol": "EURUSD"}]"#;
        let rows = parse_raw_deals(json);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticket, 1);
        assert_eq!(rows[0].magic, 0);
        assert_eq!(rows[0].commission, 0.0);
        assert_eq!(rows[0].symbol, "EURUSD");
    }

    #[test]
    fn test_parse_full_row() {
        let json = r#"[{
            "ticket": 7, "order": 8, "time": 1704103200, "entry": 2, "magic": 102030,
            "position_id": 9, "volume": 0.1, "price": 1.0950, "profit": -3.0,
            "commission": -0.5, "swap": -0.1, "symbol": "WINJ24", "comment": "sl"
        }]"#;
        let rows = parse_raw_deals(json);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].magic, 102_030);
        assert_eq!(rows[0].comment, "sl");
    }

    #[test]
    fn test_malformed_payload_is_empty() {
        assert!(parse_raw_deals("{not json").is_empty());
        assert!(parse_raw_deals(r#"[{"ticket": "x"}]"#).is_empty());
    }

    #[test]
    fn test_try_parse_surfaces_error() {
        assert!(try_parse_raw_deals("[").is_err());
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_raw_deals("[]").is_empty());
    }
}
