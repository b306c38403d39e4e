//! Embedding output as returned by a provider.

use serde::{Deserialize, Serialize};

/// One embedded text: the vector plus the provider's token count for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub token_count: usize,
}

impl Embedding {
    pub fn new(vector: Vec<f32>, token_count: usize) -> Self {
        Self {
            vector,
            token_count,
        }
    }

    /// A zero vector of the given length, used to fill slots whose provider
    /// call failed. Marked by construction: all-zero vectors rank lowest.
    pub fn zero(dimensions: usize) -> Self {
        Self {
            vector: vec![0.0; dimensions],
            token_count: 0,
        }
    }

    /// Whether this is a zero-vector placeholder.
    pub fn is_zero(&self) -> bool {
        self.vector.iter().all(|v| *v == 0.0)
    }
}
