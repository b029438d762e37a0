//! # Tradelog Analytics Engine
//!
//! This crate turns a user's journaled trades into per-trade P&L figures
//! and portfolio-level performance statistics. It is the only part of the
//! system with non-trivial numeric semantics; everything around it is
//! storage and presentation plumbing.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function is a deterministic, total
//!   function of its input. Nothing is cached, nothing is mutated in
//!   place, and empty input or missing optional fields produce defined
//!   sentinel values instead of errors.
//!
//! ## Public API
//!
//! - `calculate_trade_metrics`: per-trade derived figures.
//! - `enrich_trade` / `enrich_trades` and the filter/sort utilities.
//! - `AnalyticsEngine`: the aggregate metrics calculator.
//! - `PerformanceReport` and the per-metric report structs.
//! - `AnalyticsError`: the specific error types of this crate.

// Declare the modules that constitute this crate.
pub mod calculator;
pub mod engine;
pub mod enricher;
pub mod error;
pub mod format;
pub mod math;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use calculator::calculate_trade_metrics;
pub use engine::{AnalyticsEngine, Dimension};
pub use enricher::{
    SortField, SortOrder, closed_trades, enrich_trade, enrich_trades, filter_by_outcome,
    sort_trades,
};
pub use error::AnalyticsError;
pub use report::{
    BasicMetrics, DrawdownMetrics, DrawdownPeriod, EquityPoint, ExpectancyMetrics,
    GroupPerformance, PerformanceReport, SharpeMetrics, StreakMetrics, TimeBasedMetrics,
};
