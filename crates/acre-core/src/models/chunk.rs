//! Document chunks as produced by the ingestion pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The corpus partition a chunk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Property,
    Market,
}

impl SourceType {
    /// All partitions, in the order the vector retriever queries them.
    pub const ALL: [SourceType; 2] = [SourceType::Property, SourceType::Market];
}

/// One embedded text chunk stored in the vector store.
///
/// Invariant: `embedding.len()` equals the configured dimension after
/// normalization; the store enforces this at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub source_type: SourceType,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A chunk paired with its similarity to the query embedding.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub similarity: f64,
}
