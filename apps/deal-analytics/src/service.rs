//! Analysis service: the one pipeline every adapter goes through.
//!
//! fetch (async, with timeout) → normalize → filter → cached metrics → breakdowns
//!
//! Only the fetch suspends. Everything after it runs synchronously on the
//! completed trade sequence.
//!
//! A fetch timeout always degrades to an empty history. Source errors
//! (unreadable or undecodable export, offline terminal) degrade the same way
//! unless the service is built with [`AnalysisService::with_strict_source`],
//! in which case they surface as [`AnalyticsError::Source`].

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::breakdown::Breakdown;
use crate::cache::{MetricsCache, fingerprint};
use crate::config::Config;
use crate::deals::{
    DealSource, EaId, FetchWindow, TradeFilter, TradeRecord, available_ea_ids, available_symbols,
    fetch_with_timeout, normalize, try_fetch_with_timeout,
};
use crate::error::AnalyticsError;
use crate::metrics::{MetricsEngine, MetricsResult};

/// Metrics and dashboard series for one filtered trade set.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Filter the report was computed for.
    pub filter: TradeFilter,
    /// Trades after filtering.
    pub trades: usize,
    /// Content fingerprint of the filtered trades.
    pub fingerprint: String,
    /// Metrics snapshot.
    pub metrics: MetricsResult,
    /// Dashboard series.
    pub breakdown: Breakdown,
}

/// Choices for populating filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct symbols, sorted.
    pub symbols: Vec<String>,
    /// Distinct strategy keys, `Manual` first.
    pub ea_ids: Vec<EaId>,
}

/// Runs the analysis pipeline against a deal source.
pub struct AnalysisService {
    source: Arc<dyn DealSource>,
    cache: MetricsCache,
    cache_enabled: bool,
    fetch_timeout: Duration,
    top_trades: usize,
    strict_source: bool,
}

impl AnalysisService {
    /// Build a service from configuration.
    #[must_use]
    pub fn new(source: Arc<dyn DealSource>, config: &Config) -> Self {
        let engine = MetricsEngine::new(config.analysis.engine_settings());
        let cache = match config.cache.max_entries {
            Some(max) => MetricsCache::new(engine).with_max_entries(max),
            None => MetricsCache::new(engine),
        };

        Self {
            source,
            cache,
            cache_enabled: config.cache.enabled,
            fetch_timeout: config.source.fetch_timeout(),
            top_trades: config.analysis.top_trades,
            strict_source: false,
        }
    }

    /// Surface source errors instead of continuing with an empty history.
    #[must_use]
    pub fn with_strict_source(mut self, strict: bool) -> Self {
        self.strict_source = strict;
        self
    }

    /// The metrics cache.
    #[must_use]
    pub const fn cache(&self) -> &MetricsCache {
        &self.cache
    }

    /// Fetch and normalize every closed trade inside the window.
    pub async fn load_trades(&self, window: FetchWindow) -> Result<Vec<TradeRecord>, AnalyticsError> {
        let source = self.source.as_ref();
        let rows = if self.strict_source {
            try_fetch_with_timeout(source, window, self.fetch_timeout).await?
        } else {
            fetch_with_timeout(source, window, self.fetch_timeout).await
        };
        Ok(normalize(&rows))
    }

    /// Closed trades matching `filter`, in source order.
    pub async fn trades(&self, filter: &TradeFilter) -> Result<Vec<TradeRecord>, AnalyticsError> {
        let window = FetchWindow {
            from: filter.from,
            to: filter.to,
        };
        let trades = self.load_trades(window).await?;
        if filter.is_unrestricted() {
            return Ok(trades);
        }
        let selected = filter.apply(&trades);
        tracing::debug!(loaded = trades.len(), selected = selected.len(), "Applied trade filter");
        Ok(selected)
    }

    /// Metrics for a trade sequence, through the cache when enabled.
    pub fn metrics(&self, trades: &[TradeRecord]) -> Result<Arc<MetricsResult>, AnalyticsError> {
        let result = if self.cache_enabled {
            self.cache.get_or_compute(trades)?
        } else {
            Arc::new(self.cache.engine().compute(trades)?)
        };
        Ok(result)
    }

    /// Full analysis for `filter`.
    pub async fn analyze(&self, filter: &TradeFilter) -> Result<AnalysisReport, AnalyticsError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(AnalyticsError::invalid_request(format!(
                    "window start {from} is after end {to}"
                )));
            }
        }

        let trades = self.trades(filter).await?;
        let metrics = self.metrics(&trades)?;

        tracing::info!(
            trades = trades.len(),
            net_profit = metrics.general.net_profit,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            filter: filter.clone(),
            trades: trades.len(),
            fingerprint: fingerprint(&trades),
            metrics: MetricsResult::clone(&metrics),
            breakdown: Breakdown::from_trades(&trades, self.top_trades),
        })
    }

    /// Symbols and strategy keys present inside `window`.
    pub async fn filter_options(&self, window: FetchWindow) -> Result<FilterOptions, AnalyticsError> {
        let trades = self.load_trades(window).await?;
        Ok(FilterOptions {
            symbols: available_symbols(&trades),
            ea_ids: available_ea_ids(&trades),
        })
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
