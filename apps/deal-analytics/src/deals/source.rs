//! Deal Source Port (Driven Port)
//!
//! Interface for fetching raw deal history from the trading terminal or an
//! export of it. Fetching is the only part of the pipeline that may block, so
//! it is async; the metrics computation downstream is not.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::raw::{RawDeal, try_parse_raw_deals};

/// Inclusive time window for a fetch. Absent bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchWindow {
    /// Earliest deal time.
    pub from: Option<DateTime<Utc>>,
    /// Latest deal time.
    pub to: Option<DateTime<Utc>>,
}

impl FetchWindow {
    /// Window without bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { from: None, to: None }
    }

    /// Window between two instants, inclusive.
    #[must_use]
    pub const fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Check an epoch-seconds timestamp against the window.
    #[must_use]
    pub fn contains_epoch(&self, epoch_secs: i64) -> bool {
        self.from.is_none_or(|f| epoch_secs >= f.timestamp())
            && self.to.is_none_or(|t| epoch_secs <= t.timestamp())
    }
}

/// Deal source error.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Reading the backing store failed.
    #[error("Failed to read deals from '{path}': {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Payload could not be decoded.
    #[error("Failed to decode deal payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Terminal or connector unavailable.
    #[error("Deal source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for fetching raw deal history.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetch deals inside the window, in chronological order.
    async fn fetch_deals(&self, window: FetchWindow) -> Result<Vec<RawDeal>, SourceError>;
}

/// Deals loaded from a JSON export (an array of raw rows).
#[derive(Debug, Clone)]
pub struct JsonFileDealSource {
    path: PathBuf,
}

impl JsonFileDealSource {
    /// Create a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DealSource for JsonFileDealSource {
    async fn fetch_deals(&self, window: FetchWindow) -> Result<Vec<RawDeal>, SourceError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| SourceError::Read {
                    path: self.path.display().to_string(),
                    source: e,
                })?;

        let rows = try_parse_raw_deals(&contents)?;
        let total = rows.len();
        let rows: Vec<RawDeal> = rows
            .into_iter()
            .filter(|r| window.contains_epoch(r.time))
            .collect();

        tracing::debug!(
            path = %self.path.display(),
            total,
            in_window = rows.len(),
            "Loaded deal export"
        );
        Ok(rows)
    }
}

/// Fixed in-memory deal history, with an optional artificial latency.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDealSource {
    deals: Vec<RawDeal>,
    latency: Option<Duration>,
}

impl InMemoryDealSource {
    /// Create a source over the given rows.
    #[must_use]
    pub const fn new(deals: Vec<RawDeal>) -> Self {
        Self {
            deals,
            latency: None,
        }
    }

    /// Delay every fetch by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl DealSource for InMemoryDealSource {
    async fn fetch_deals(&self, window: FetchWindow) -> Result<Vec<RawDeal>, SourceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(self
            .deals
            .iter()
            .filter(|r| window.contains_epoch(r.time))
            .cloned()
            .collect())
    }
}

/// Fetch under a deadline, surfacing source errors.
///
/// A timeout is not an error: it logs a warning and yields an empty history.
pub async fn try_fetch_with_timeout(
    source: &dyn DealSource,
    window: FetchWindow,
    timeout: Duration,
) -> Result<Vec<RawDeal>, SourceError> {
    match tokio::time::timeout(timeout, source.fetch_deals(window)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                "Deal fetch timed out, continuing with empty history"
            );
            Ok(Vec::new())
        }
    }
}

/// Fetch under a deadline. Timeouts and source errors yield an empty history.
pub async fn fetch_with_timeout(
    source: &dyn DealSource,
    window: FetchWindow,
    timeout: Duration,
) -> Vec<RawDeal> {
    try_fetch_with_timeout(source, window, timeout)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Deal fetch failed, continuing with empty history");
            Vec::new()
        })
}
