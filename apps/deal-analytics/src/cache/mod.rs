//! Memoization of metrics by trade-set content.
//!
//! The cache is an explicit object holding its engine, so callers can share
//! one instance across threads or build a fresh one per test. Entries are
//! keyed by [`fingerprint`] and stored as `Arc<MetricsResult>`; a hit hands
//! out the same allocation, never a recomputed copy.

mod fingerprint;

pub use fingerprint::{EMPTY_FINGERPRINT, fingerprint};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::deals::TradeRecord;
use crate::metrics::{MetricsEngine, MetricsError, MetricsResult};

/// Thread-safe metrics cache.
#[derive(Debug)]
pub struct MetricsCache {
    engine: MetricsEngine,
    entries: Mutex<HashMap<String, Arc<MetricsResult>>>,
    max_entries: Option<usize>,
}

impl MetricsCache {
    /// Create an unbounded cache around an engine.
    #[must_use]
    pub fn new(engine: MetricsEngine) -> Self {
        Self {
            engine,
            entries: Mutex::new(HashMap::new()),
            max_entries: None,
        }
    }

    /// Stop inserting once `max` entries are stored. Existing entries are
    /// never evicted; [`Self::clear`] resets the cache.
    #[must_use]
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// The wrapped engine.
    #[must_use]
    pub const fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    /// Return cached metrics for `trades`, computing and storing them on a miss.
    ///
    /// Failed computations are never stored. Under `FailClosed` they yield
    /// the zero result; under `FailOpen` the error is returned.
    pub fn get_or_compute(
        &self,
        trades: &[TradeRecord],
    ) -> Result<Arc<MetricsResult>, MetricsError> {
        let key = fingerprint(trades);

        if let Some(hit) = self.entries.lock().get(&key) {
            tracing::debug!(fingerprint = %key, "Metrics cache hit");
            return Ok(Arc::clone(hit));
        }

        tracing::debug!(fingerprint = %key, trades = trades.len(), "Metrics cache miss");

        // Computed outside the lock; a concurrent miss on the same key may
        // compute twice, and the first stored value wins.
        let computed = match self.engine.try_compute(trades) {
            Ok(result) => Arc::new(result),
            Err(e) => return self.engine.recover(e, trades.len()).map(Arc::new),
        };

        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&key) {
            return Ok(Arc::clone(existing));
        }
        if self.max_entries.is_some_and(|max| entries.len() >= max) {
            tracing::debug!(fingerprint = %key, "Metrics cache full, not storing");
            return Ok(computed);
        }
        entries.insert(key, Arc::clone(&computed));
        Ok(computed)
    }

    /// Whether metrics for `trades` are cached.
    #[must_use]
    pub fn contains(&self, trades: &[TradeRecord]) -> bool {
        self.entries.lock().contains_key(&fingerprint(trades))
    }

    /// Remove every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        let removed = entries.len();
        entries.clear();
        tracing::debug!(removed, "Metrics cache cleared");
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new(MetricsEngine::default())
    }
}
