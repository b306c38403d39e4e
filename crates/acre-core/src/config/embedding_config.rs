use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{RetrievalError, RetrievalResult};

/// Embedding provider throttling and output shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Dimensionality every stored and query vector is normalized to.
    pub dimensions: usize,
    /// Texts per provider call.
    pub batch_size: usize,
    /// Sub-batches allowed in flight at once.
    pub max_concurrent_batches: usize,
    /// Minimum spacing between provider calls.
    pub min_call_interval_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: constants::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: constants::DEFAULT_EMBEDDING_BATCH_SIZE,
            max_concurrent_batches: constants::DEFAULT_MAX_CONCURRENT_BATCHES,
            min_call_interval_ms: constants::DEFAULT_MIN_CALL_INTERVAL_MS,
        }
    }
}

impl EmbeddingConfig {
    pub fn validate(&self) -> RetrievalResult<()> {
        if self.dimensions == 0 {
            return Err(RetrievalError::Validation {
                field: "embedding.dimensions".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(RetrievalError::Validation {
                field: "embedding.batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_concurrent_batches == 0 {
            return Err(RetrievalError::Validation {
                field: "embedding.max_concurrent_batches".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
