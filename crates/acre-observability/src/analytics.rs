//! Capped in-memory telemetry sink.

use tokio::sync::Mutex;
use tracing::debug;

use acre_core::errors::RetrievalResult;
use acre_core::models::SearchTelemetry;
use acre_core::traits::IAnalyticsSink;

use crate::report::PerformanceReport;

const DEFAULT_CAPACITY: usize = 1_000;

/// Append-only in-memory search log. When full, the oldest entries are
/// dropped. Engines treat this sink as best-effort; it never blocks or
/// fails a search.
pub struct SearchAnalytics {
    entries: Mutex<Vec<SearchTelemetry>>,
    capacity: usize,
}

impl Default for SearchAnalytics {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SearchAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    /// Most recent `n` entries, newest first.
    pub async fn recent(&self, n: usize) -> Vec<SearchTelemetry> {
        let entries = self.entries.lock().await;
        entries.iter().rev().take(n).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Aggregate what has been collected so far.
    pub async fn report(&self) -> PerformanceReport {
        let entries = self.entries.lock().await;
        PerformanceReport::from_entries(&entries)
    }
}

impl IAnalyticsSink for SearchAnalytics {
    async fn record(&self, telemetry: SearchTelemetry) -> RetrievalResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.len() >= self.capacity {
            let overflow = entries.len() + 1 - self.capacity;
            entries.drain(..overflow);
        }
        debug!(
            strategy = %telemetry.strategy,
            results = telemetry.result_count,
            "telemetry recorded"
        );
        entries.push(telemetry);
        Ok(())
    }
}
