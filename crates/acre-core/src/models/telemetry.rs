//! Per-search telemetry emitted to the analytics sink.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::QueryStrategy;

/// One search execution record. Append-only; sink failures never affect the
/// search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTelemetry {
    pub query: String,
    pub strategy: QueryStrategy,
    pub result_count: usize,
    pub response_time: Duration,
    pub has_results: bool,
    /// Set when a retriever failed and was degraded to an empty list, so
    /// "failed" is distinguishable from "legitimately empty".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub timestamp_epoch_ms: i64,
}

impl SearchTelemetry {
    /// Build a record with the timestamp set to now.
    pub fn new(
        query: impl Into<String>,
        strategy: QueryStrategy,
        result_count: usize,
        response_time: Duration,
        failure: Option<String>,
    ) -> Self {
        Self {
            query: query.into(),
            strategy,
            result_count,
            response_time,
            has_results: result_count > 0,
            failure,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}
