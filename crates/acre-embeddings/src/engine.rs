//! Cache-fronted, rate-limited embedding engine.

use std::time::{Duration, Instant};

use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, warn};

use acre_core::config::{CacheConfig, EmbeddingConfig};
use acre_core::errors::RetrievalResult;
use acre_core::models::Embedding;
use acre_core::traits::IEmbeddingProvider;

use crate::cache::{CacheStats, EmbeddingCache};
use crate::normalize::normalize_dimensions;

/// Fronts an [`IEmbeddingProvider`] with caching, output normalization,
/// call pacing, and bounded concurrency.
///
/// The semaphore caps provider calls in flight across every task sharing
/// the engine; the pacing lock spreads the calls it does admit at least
/// `min_call_interval_ms` apart.
pub struct EmbeddingEngine<P> {
    provider: P,
    cache: EmbeddingCache,
    config: EmbeddingConfig,
    permits: Semaphore,
    last_call: Mutex<Option<Instant>>,
}

impl<P: IEmbeddingProvider> EmbeddingEngine<P> {
    pub fn new(provider: P, embedding: EmbeddingConfig, cache: CacheConfig) -> Self {
        let permits = Semaphore::new(embedding.max_concurrent_batches);
        Self {
            provider,
            cache: EmbeddingCache::new(cache),
            config: embedding,
            permits,
            last_call: Mutex::new(None),
        }
    }

    /// Embed one query text, consulting the cache first. A hit returns
    /// exactly what was stored, token count included.
    pub async fn embed_query(&self, text: &str) -> RetrievalResult<Embedding> {
        let text = text.trim();
        if let Some(embedding) = self.cache.get(self.provider.name(), text).await {
            debug!(model = self.provider.name(), "embedding cache hit");
            return Ok(embedding);
        }

        let raw = self.call_provider_single(text).await?;
        let embedding = Embedding::new(
            normalize_dimensions(raw.vector, self.config.dimensions),
            raw.token_count,
        );
        self.cache
            .set(self.provider.name(), text, embedding.clone())
            .await;
        Ok(embedding)
    }

    /// Embed a document batch for ingestion. Texts the provider cannot
    /// embed come back as zero vectors rather than failing the batch, and
    /// output order matches input order.
    pub async fn embed_documents(&self, texts: &[String]) -> RetrievalResult<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        let mut placeholders = 0usize;
        for sub_batch in texts.chunks(self.config.batch_size.max(1)) {
            let slots = self.call_provider_batch(sub_batch).await;
            for slot in slots {
                let embedding = match slot {
                    Some(e) => e,
                    None => Embedding::zero(self.config.dimensions),
                };
                if embedding.is_zero() {
                    placeholders += 1;
                }
                out.push(normalize_dimensions(embedding.vector, self.config.dimensions));
            }
        }
        if placeholders > 0 {
            debug!(placeholders, total = texts.len(), "batch contains zero-vector placeholders");
        }
        Ok(out)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    async fn call_provider_single(&self, text: &str) -> RetrievalResult<Embedding> {
        let _permit = self.permits.acquire().await.map_err(|_| {
            acre_core::RetrievalError::provider(self.provider.name(), "engine shut down")
        })?;
        self.pace().await;
        self.provider.embed(text).await
    }

    async fn call_provider_batch(&self, texts: &[String]) -> Vec<Option<Embedding>> {
        let permit = self.permits.acquire().await;
        if permit.is_err() {
            return vec![None; texts.len()];
        }
        self.pace().await;
        match self.provider.embed_batch(texts).await {
            Ok(slots) if slots.len() == texts.len() => slots,
            Ok(slots) => {
                warn!(
                    expected = texts.len(),
                    got = slots.len(),
                    "provider returned wrong batch size, padding with zero vectors"
                );
                let mut slots = slots;
                slots.resize(texts.len(), None);
                slots.truncate(texts.len());
                slots
            }
            Err(e) => {
                warn!(error = %e, batch = texts.len(), "batch embedding failed, substituting zero vectors");
                vec![None; texts.len()]
            }
        }
    }

    /// Enforce the minimum interval between provider calls.
    async fn pace(&self) {
        let interval = Duration::from_millis(self.config.min_call_interval_ms);
        if interval.is_zero() {
            return;
        }
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < interval {
                tokio::time::sleep(interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use acre_core::RetrievalError;

    struct CountingProvider {
        calls: AtomicUsize,
        dims: usize,
    }

    impl CountingProvider {
        fn new(dims: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                dims,
            }
        }
    }

    impl IEmbeddingProvider for CountingProvider {
        async fn embed(&self, text: &str) -> RetrievalResult<Embedding> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Embedding::new(vec![text.len() as f32; self.dims], text.len()))
        }

        async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .map(|t| Some(Embedding::new(vec![t.len() as f32; self.dims], t.len())))
                .collect())
        }

        fn dimensions(&self) -> usize {
            self.dims
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FailingProvider;

    impl IEmbeddingProvider for FailingProvider {
        async fn embed(&self, _text: &str) -> RetrievalResult<Embedding> {
            Err(RetrievalError::provider("failing", "unavailable"))
        }

        async fn embed_batch(&self, _texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
            Err(RetrievalError::provider("failing", "unavailable"))
        }

        fn dimensions(&self) -> usize {
            4
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn fast_config(dims: usize) -> EmbeddingConfig {
        EmbeddingConfig {
            dimensions: dims,
            min_call_interval_ms: 0,
            ..EmbeddingConfig::default()
        }
    }

    fn memory_cache() -> CacheConfig {
        CacheConfig {
            persist_dir: None,
            ..CacheConfig::default()
        }
    }

    #[tokio::test]
    async fn repeated_query_hits_cache_not_provider() {
        let engine = EmbeddingEngine::new(CountingProvider::new(4), fast_config(4), memory_cache());
        let first = engine.embed_query("homes in Austin").await.unwrap();
        let second = engine.embed_query("homes in Austin").await.unwrap();
        assert_eq!(first, second);
        // the cached hit carries the provider's token count back out
        assert_eq!(second.token_count, "homes in Austin".len());
        assert_eq!(engine.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn query_vectors_match_configured_dimensions() {
        // provider emits 8 dims, engine is configured for 4
        let engine = EmbeddingEngine::new(CountingProvider::new(8), fast_config(4), memory_cache());
        let embedding = engine.embed_query("anything").await.unwrap();
        assert_eq!(embedding.vector.len(), 4);
    }

    #[tokio::test]
    async fn failed_batch_yields_zero_vectors_in_order() {
        let engine = EmbeddingEngine::new(FailingProvider, fast_config(4), memory_cache());
        let texts = vec!["a".to_string(), "b".to_string()];
        let vectors = engine.embed_documents(&texts).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|v| v.iter().all(|x| *x == 0.0)));
    }

    /// Fails whole sub-batches whenever one contains a text the provider
    /// rejects, leaving other sub-batches untouched.
    struct RejectingProvider {
        dims: usize,
        rejects: &'static str,
    }

    impl IEmbeddingProvider for RejectingProvider {
        async fn embed(&self, text: &str) -> RetrievalResult<Embedding> {
            if text.contains(self.rejects) {
                return Err(RetrievalError::provider("rejecting", "rejected input"));
            }
            Ok(Embedding::new(vec![1.0; self.dims], 1))
        }

        async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
            if texts.iter().any(|t| t.contains(self.rejects)) {
                return Err(RetrievalError::provider("rejecting", "rejected input"));
            }
            Ok(texts
                .iter()
                .map(|_| Some(Embedding::new(vec![1.0; self.dims], 1)))
                .collect())
        }

        fn dimensions(&self) -> usize {
            self.dims
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    #[tokio::test]
    async fn partial_batch_failure_zeroes_only_failed_slots() {
        let config = EmbeddingConfig {
            dimensions: 4,
            batch_size: 2,
            min_call_interval_ms: 0,
            ..EmbeddingConfig::default()
        };
        let provider = RejectingProvider {
            dims: 4,
            rejects: "unembeddable",
        };
        let engine = EmbeddingEngine::new(provider, config, memory_cache());
        // sub-batches: [a, b], [unembeddable, d], [e]
        let texts: Vec<String> = ["a", "b", "unembeddable", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let vectors = engine.embed_documents(&texts).await.unwrap();
        assert_eq!(vectors.len(), 5);
        let zeroed: Vec<bool> = vectors
            .iter()
            .map(|v| v.iter().all(|x| *x == 0.0))
            .collect();
        assert_eq!(zeroed, vec![false, false, true, true, false]);
    }

    #[tokio::test]
    async fn failed_single_query_propagates() {
        let engine = EmbeddingEngine::new(FailingProvider, fast_config(4), memory_cache());
        assert!(engine.embed_query("anything").await.is_err());
    }

    #[tokio::test]
    async fn large_batch_is_split_by_batch_size() {
        let config = EmbeddingConfig {
            dimensions: 4,
            batch_size: 2,
            min_call_interval_ms: 0,
            ..EmbeddingConfig::default()
        };
        let engine = EmbeddingEngine::new(CountingProvider::new(4), config, memory_cache());
        let texts: Vec<String> = (0..5).map(|i| format!("text {i}")).collect();
        let vectors = engine.embed_documents(&texts).await.unwrap();
        assert_eq!(vectors.len(), 5);
        // 5 texts at batch size 2 -> 3 provider calls
        assert_eq!(engine.provider.calls.load(Ordering::SeqCst), 3);
    }
}
