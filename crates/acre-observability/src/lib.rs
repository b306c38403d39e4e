//! # acre-observability
//!
//! Best-effort search telemetry: an in-memory analytics sink, aggregate
//! performance/failure reporting over what it collected, and tracing
//! subscriber setup.

pub mod analytics;
pub mod report;
pub mod tracing_setup;

pub use analytics::SearchAnalytics;
pub use report::{PerformanceReport, StrategyStats};
