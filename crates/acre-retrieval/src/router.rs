//! Keyword-based query strategy selection.

use std::collections::HashMap;

use acre_core::models::QueryStrategy;
use tracing::debug;

/// Terms that signal a relationship/connection question, best answered by
/// graph traversal.
const GRAPH_INTENT: [&str; 5] = [
    "relationship",
    "connect",
    "link",
    "who",
    "what is the connection",
];

/// Terms that signal an aggregate or comparison question, best answered by
/// similarity search over market chunks.
const VECTOR_INTENT: [&str; 4] = [
    "how many",
    "what is the average",
    "compare",
    "what is the median price",
];

/// Classifies a query into a [`QueryStrategy`].
///
/// Pure and total: the same query always maps to the same strategy, and
/// every query maps to one. Graph intent wins over vector intent; anything
/// unclassified runs hybrid.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryStrategyRouter;

impl QueryStrategyRouter {
    pub fn new() -> Self {
        Self
    }

    /// Pick a strategy for `query`. The context map is accepted for parity
    /// with the request model but not yet consulted.
    pub fn classify(&self, query: &str, _context: &HashMap<String, String>) -> QueryStrategy {
        let lower = query.to_lowercase();

        let strategy = if GRAPH_INTENT.iter().any(|k| lower.contains(k)) {
            QueryStrategy::GraphOnly
        } else if VECTOR_INTENT.iter().any(|k| lower.contains(k)) {
            QueryStrategy::VectorOnly
        } else {
            QueryStrategy::Hybrid
        };
        debug!(%strategy, "query classified");
        strategy
    }
}
