use std::sync::atomic::{AtomicUsize, Ordering};

use acre_core::errors::{RetrievalError, RetrievalResult};
use acre_core::models::{Embedding, SearchTelemetry};
use acre_core::traits::{IAnalyticsSink, IEmbeddingProvider};

/// Keyword groups that define the fixture embedding space. Each group is
/// one dimension, so similarity between texts is interpretable in tests.
const KEYWORD_GROUPS: [&[&str]; 4] = [
    &["austin"],
    &["dallas"],
    &["house", "home", "bedroom"],
    &["market", "price", "inventory"],
];

/// Base component added to every dimension so no text embeds to the zero
/// vector.
const BASELINE: f32 = 0.1;

/// Deterministic embedding provider over a tiny keyword space.
///
/// Two texts mentioning the same keyword groups embed to parallel vectors
/// (cosine 1.0), which lets tests plant corpus chunks with known
/// similarity to a known query.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordEmbeddingProvider;

impl KeywordEmbeddingProvider {
    pub fn new() -> Self {
        Self
    }

    /// The embedding this provider produces for `text`, exposed so corpus
    /// builders can plant chunk vectors directly.
    pub fn embed_text(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        KEYWORD_GROUPS
            .iter()
            .map(|group| {
                let hit = group.iter().any(|k| lower.contains(k));
                if hit {
                    1.0 + BASELINE
                } else {
                    BASELINE
                }
            })
            .collect()
    }
}

impl IEmbeddingProvider for KeywordEmbeddingProvider {
    async fn embed(&self, text: &str) -> RetrievalResult<Embedding> {
        let token_count = text.split_whitespace().count();
        Ok(Embedding::new(Self::embed_text(text), token_count))
    }

    async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(Some(self.embed(text).await?));
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        KEYWORD_GROUPS.len()
    }

    fn name(&self) -> &str {
        "keyword-fixture"
    }
}

/// Provider whose every call fails, for degradation tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingProvider;

impl IEmbeddingProvider for FailingProvider {
    async fn embed(&self, _text: &str) -> RetrievalResult<Embedding> {
        Err(RetrievalError::provider("failing-fixture", "provider down"))
    }

    async fn embed_batch(&self, _texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
        Err(RetrievalError::provider("failing-fixture", "provider down"))
    }

    fn dimensions(&self) -> usize {
        4
    }

    fn name(&self) -> &str {
        "failing-fixture"
    }
}

/// Wraps another provider and counts the calls reaching it, so tests can
/// assert that caching or short-circuiting avoided provider traffic.
pub struct CountingProvider<P> {
    inner: P,
    calls: AtomicUsize,
}

impl<P> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: IEmbeddingProvider> IEmbeddingProvider for CountingProvider<P> {
    async fn embed(&self, text: &str) -> RetrievalResult<Embedding> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Analytics sink whose every record call fails, to verify sink failures
/// never affect search results.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSink;

impl IAnalyticsSink for FailingSink {
    async fn record(&self, _telemetry: SearchTelemetry) -> RetrievalResult<()> {
        Err(RetrievalError::query("sink rejected telemetry"))
    }
}
