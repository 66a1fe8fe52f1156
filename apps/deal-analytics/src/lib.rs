// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_collect,
        clippy::cast_possible_wrap,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Deal Analytics - Rust Core Library
//!
//! Trading-performance statistics over closed broker deals.
//!
//! # Pipeline
//!
//! - **deals**: raw terminal rows, the closing-entry and magic → `ea_id`
//!   mappings, normalization into `TradeRecord`, filtering, and the async
//!   `DealSource` port
//! - **metrics**: the single metrics engine (profit factor, expectancy,
//!   Sharpe, recovery factor, drawdown, streaks, runs z-score)
//! - **cache**: content-fingerprinted memoization of metrics results
//! - **breakdown**: equity (with trend line), daily, session, weekday × hour
//!   and top-trade series
//! - **service**: fetch → normalize → filter → cache wiring shared by adapters
//!
//! Ambient: `config` (YAML + env interpolation), `telemetry` (tracing
//! subscriber), `error` (top-level error and codes).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod breakdown;
pub mod cache;
pub mod config;
pub mod deals;
pub mod error;
pub mod metrics;
pub mod service;
pub mod telemetry;

pub use cache::MetricsCache;
pub use deals::{EaId, TradeFilter, TradeRecord};
pub use error::{AnalyticsError, ErrorCode};
pub use metrics::{FailurePolicy, MetricsEngine, MetricsResult};
pub use service::{AnalysisReport, AnalysisService};
