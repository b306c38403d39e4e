use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use acre_core::errors::{RetrievalError, RetrievalResult};
use acre_core::models::{DocumentChunk, ScoredChunk, SourceType};
use acre_core::traits::IVectorStore;

/// Brute-force cosine similarity store over an in-memory chunk list.
/// Counts calls so tests can assert short-circuit behavior.
#[derive(Default)]
pub struct InMemoryVectorStore {
    chunks: Vec<DocumentChunk>,
    calls: AtomicUsize,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunks(chunks: Vec<DocumentChunk>) -> Self {
        Self {
            chunks,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn add_chunk(&mut self, chunk: DocumentChunk) {
        self.chunks.push(chunk);
    }

    /// Number of similarity searches issued against this store.
    pub fn call_count(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }
}

impl IVectorStore for InMemoryVectorStore {
    async fn similarity_search(
        &self,
        partition: SourceType,
        query_embedding: &[f32],
        threshold: f64,
        filters: &HashMap<String, String>,
        limit: usize,
    ) -> RetrievalResult<Vec<ScoredChunk>> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);

        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .filter(|c| c.source_type == partition)
            .filter(|c| {
                filters
                    .iter()
                    .all(|(k, v)| c.metadata.get(k).is_some_and(|m| m == v))
            })
            .map(|c| ScoredChunk {
                similarity: cosine(&c.embedding, query_embedding),
                chunk: c.clone(),
            })
            .filter(|s| s.similarity > threshold)
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(limit);
        Ok(scored)
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// A vector store whose every call fails, for degradation tests.
pub struct FailingVectorStore;

impl IVectorStore for FailingVectorStore {
    async fn similarity_search(
        &self,
        _partition: SourceType,
        _query_embedding: &[f32],
        _threshold: f64,
        _filters: &HashMap<String, String>,
        _limit: usize,
    ) -> RetrievalResult<Vec<ScoredChunk>> {
        Err(RetrievalError::connectivity("vector", "store offline"))
    }
}
