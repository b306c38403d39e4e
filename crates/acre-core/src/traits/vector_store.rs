use std::collections::HashMap;

use crate::errors::RetrievalResult;
use crate::models::{ScoredChunk, SourceType};

/// Vector similarity store over embedded document chunks.
///
/// Chunks live in per-source partitions (property listings vs. market
/// reports). A search runs against one partition at a time; the caller
/// fans out across partitions.
pub trait IVectorStore: Send + Sync {
    /// Return chunks from `partition` whose cosine similarity to
    /// `query_embedding` strictly exceeds `threshold`, best first, at
    /// most `limit` entries.
    ///
    /// `filters` are exact-match constraints on chunk metadata; a chunk
    /// must satisfy every entry to qualify.
    async fn similarity_search(
        &self,
        partition: SourceType,
        query_embedding: &[f32],
        threshold: f64,
        filters: &HashMap<String, String>,
        limit: usize,
    ) -> RetrievalResult<Vec<ScoredChunk>>;
}

impl<S: IVectorStore> IVectorStore for std::sync::Arc<S> {
    async fn similarity_search(
        &self,
        partition: SourceType,
        query_embedding: &[f32],
        threshold: f64,
        filters: &HashMap<String, String>,
        limit: usize,
    ) -> RetrievalResult<Vec<ScoredChunk>> {
        (**self)
            .similarity_search(partition, query_embedding, threshold, filters, limit)
            .await
    }
}
