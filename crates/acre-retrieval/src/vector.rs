//! Similarity search over the embedded document corpus.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use acre_core::errors::{RetrievalError, RetrievalResult};
use acre_core::models::{ResultType, ScoredChunk, SearchResult, SourceType};
use acre_core::traits::{IEmbeddingProvider, IVectorStore};
use acre_embeddings::EmbeddingEngine;

/// Retrieves candidates by embedding the query and running per-partition
/// similarity searches over the chunk corpus.
pub struct VectorRetriever<V, P> {
    store: V,
    embedder: EmbeddingEngine<P>,
}

impl<V: IVectorStore, P: IEmbeddingProvider> VectorRetriever<V, P> {
    pub fn new(store: V, embedder: EmbeddingEngine<P>) -> Self {
        Self { store, embedder }
    }

    pub(crate) fn embedder(&self) -> &EmbeddingEngine<P> {
        &self.embedder
    }

    /// Search both corpus partitions and merge.
    ///
    /// Each partition is queried independently and capped at `limit`; the
    /// union is re-sorted by similarity before the final truncation, so a
    /// strong match in one partition is never displaced by weaker matches
    /// from the other. A partition failure is logged and contributes
    /// nothing; an embedding failure fails the whole call.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        filters: &HashMap<String, String>,
        threshold: f64,
    ) -> RetrievalResult<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed_query(query).await?;

        let mut matches: Vec<ScoredChunk> = Vec::new();
        let mut failed_partitions = 0;
        for partition in SourceType::ALL {
            match self
                .store
                .similarity_search(partition, &query_embedding.vector, threshold, filters, limit)
                .await
            {
                Ok(chunks) => matches.extend(chunks),
                Err(e) => {
                    failed_partitions += 1;
                    warn!(?partition, error = %e, "partition search failed");
                }
            }
        }
        if failed_partitions == SourceType::ALL.len() {
            return Err(RetrievalError::connectivity(
                "vector",
                "every partition search failed",
            ));
        }

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        matches.truncate(limit);

        debug!(query, matches = matches.len(), "vector search complete");
        Ok(matches.into_iter().map(to_search_result).collect())
    }
}

fn to_search_result(scored: ScoredChunk) -> SearchResult {
    let chunk = scored.chunk;
    let (result_type, title, source) = match chunk.source_type {
        SourceType::Property => (
            ResultType::Property,
            chunk
                .metadata
                .get("address")
                .cloned()
                .unwrap_or_else(|| format!("Property {}", chunk.id)),
            "Property Listing".to_string(),
        ),
        SourceType::Market => (
            ResultType::MarketData,
            chunk
                .metadata
                .get("region_name")
                .map(|r| format!("{r} Market Data"))
                .unwrap_or_else(|| format!("Market Report {}", chunk.id)),
            "Market Analysis".to_string(),
        ),
    };
    SearchResult {
        result_id: chunk.id,
        content: chunk.content,
        result_type,
        title,
        source,
        similarity_score: Some(scored.similarity),
        relevance_score: None,
        created_at: None,
    }
}
