//! Aggregate reporting over collected telemetry.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use acre_core::models::{QueryStrategy, SearchTelemetry};

/// Aggregates for one strategy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StrategyStats {
    pub searches: usize,
    pub total_results: usize,
    pub empty_searches: usize,
    pub avg_response_time: Duration,
}

impl StrategyStats {
    pub fn empty_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.empty_searches as f64 / self.searches as f64
        }
    }
}

/// Per-strategy performance plus the failures seen, so degraded searches
/// are visible even though callers only ever saw result lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceReport {
    pub by_strategy: HashMap<QueryStrategy, StrategyStats>,
    pub failure_count: usize,
    /// Failure notes with their queries, oldest first.
    pub failures: Vec<(String, String)>,
}

impl PerformanceReport {
    pub fn from_entries(entries: &[SearchTelemetry]) -> Self {
        let mut report = PerformanceReport::default();
        let mut total_time: HashMap<QueryStrategy, Duration> = HashMap::new();

        for entry in entries {
            let stats = report.by_strategy.entry(entry.strategy).or_default();
            stats.searches += 1;
            stats.total_results += entry.result_count;
            if !entry.has_results {
                stats.empty_searches += 1;
            }
            *total_time.entry(entry.strategy).or_default() += entry.response_time;

            if let Some(failure) = &entry.failure {
                report.failure_count += 1;
                report.failures.push((entry.query.clone(), failure.clone()));
            }
        }

        for (strategy, stats) in report.by_strategy.iter_mut() {
            if stats.searches > 0 {
                stats.avg_response_time = total_time[strategy] / stats.searches as u32;
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        strategy: QueryStrategy,
        count: usize,
        millis: u64,
        failure: Option<&str>,
    ) -> SearchTelemetry {
        SearchTelemetry::new(
            "q",
            strategy,
            count,
            Duration::from_millis(millis),
            failure.map(String::from),
        )
    }

    #[test]
    fn aggregates_per_strategy() {
        let entries = vec![
            entry(QueryStrategy::Hybrid, 5, 10, None),
            entry(QueryStrategy::Hybrid, 0, 30, None),
            entry(QueryStrategy::VectorOnly, 2, 8, None),
        ];
        let report = PerformanceReport::from_entries(&entries);
        let hybrid = &report.by_strategy[&QueryStrategy::Hybrid];
        assert_eq!(hybrid.searches, 2);
        assert_eq!(hybrid.total_results, 5);
        assert_eq!(hybrid.empty_searches, 1);
        assert_eq!(hybrid.avg_response_time, Duration::from_millis(20));
        assert!((hybrid.empty_rate() - 0.5).abs() < 1e-9);
        assert_eq!(report.by_strategy[&QueryStrategy::VectorOnly].searches, 1);
    }

    #[test]
    fn failures_are_collected_in_order() {
        let entries = vec![
            entry(QueryStrategy::Hybrid, 0, 1, Some("vector: provider down")),
            entry(QueryStrategy::Hybrid, 3, 1, None),
            entry(QueryStrategy::GraphOnly, 0, 1, Some("graph: store offline")),
        ];
        let report = PerformanceReport::from_entries(&entries);
        assert_eq!(report.failure_count, 2);
        assert_eq!(report.failures[0].1, "vector: provider down");
        assert_eq!(report.failures[1].1, "graph: store offline");
    }

    #[test]
    fn report_serializes_with_strategy_keys() {
        let entries = vec![entry(QueryStrategy::Hybrid, 1, 2, None)];
        let report = PerformanceReport::from_entries(&entries);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["by_strategy"]["hybrid"]["searches"].is_number());
    }

    #[test]
    fn empty_log_yields_empty_report() {
        let report = PerformanceReport::from_entries(&[]);
        assert!(report.by_strategy.is_empty());
        assert_eq!(report.failure_count, 0);
    }
}
