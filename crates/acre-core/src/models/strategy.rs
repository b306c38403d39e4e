//! Retrieval strategies the router selects between.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a query is executed. A pure function of the query text plus optional
/// context; no hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStrategy {
    VectorOnly,
    GraphOnly,
    Hybrid,
    /// External sources; present in the wire format but not served by this
    /// engine (dispatch degrades to vector-only).
    External,
}

impl fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryStrategy::VectorOnly => "vector_only",
            QueryStrategy::GraphOnly => "graph_only",
            QueryStrategy::Hybrid => "hybrid",
            QueryStrategy::External => "external",
        };
        f.write_str(name)
    }
}
