use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{RetrievalError, RetrievalResult};

/// Knobs for search fan-out and score fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Baseline weight of the vector channel in hybrid fusion.
    pub vector_weight: f64,
    /// Baseline weight of the graph channel in hybrid fusion.
    pub graph_weight: f64,
    /// Minimum cosine similarity for a vector hit to qualify.
    pub similarity_threshold: f64,
    /// Default result count when a request does not set one.
    pub default_limit: usize,
    /// Maximum traversal depth for graph queries.
    pub max_depth: usize,
    /// Per-retriever wall-clock budget; a channel that exceeds it is
    /// treated as having failed.
    pub retriever_timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector_weight: constants::DEFAULT_VECTOR_WEIGHT,
            graph_weight: constants::DEFAULT_GRAPH_WEIGHT,
            similarity_threshold: constants::DEFAULT_SIMILARITY_THRESHOLD,
            default_limit: constants::DEFAULT_RESULT_LIMIT,
            max_depth: constants::DEFAULT_MAX_DEPTH,
            retriever_timeout_secs: constants::DEFAULT_RETRIEVER_TIMEOUT_SECS,
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> RetrievalResult<()> {
        if !(0.0..=1.0).contains(&self.vector_weight) {
            return Err(RetrievalError::Validation {
                field: "retrieval.vector_weight".to_string(),
                reason: "must be in [0, 1]".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.graph_weight) {
            return Err(RetrievalError::Validation {
                field: "retrieval.graph_weight".to_string(),
                reason: "must be in [0, 1]".to_string(),
            });
        }
        if (self.vector_weight + self.graph_weight - 1.0).abs() > 1e-6 {
            return Err(RetrievalError::Validation {
                field: "retrieval.graph_weight".to_string(),
                reason: "vector_weight + graph_weight must sum to 1.0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(RetrievalError::Validation {
                field: "retrieval.similarity_threshold".to_string(),
                reason: "must be in [0, 1]".to_string(),
            });
        }
        if self.default_limit == 0 {
            return Err(RetrievalError::Validation {
                field: "retrieval.default_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
