use crate::errors::RetrievalResult;
use crate::models::Embedding;

/// Text embedding backend.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> RetrievalResult<Embedding>;

    /// Embed a batch of texts. The output has exactly one slot per input;
    /// a `None` slot marks a text the provider could not embed, leaving
    /// the caller to substitute a placeholder.
    async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>>;

    /// Native dimensionality of vectors this provider produces.
    fn dimensions(&self) -> usize;

    /// Model identifier, used to partition the embedding cache.
    fn name(&self) -> &str;
}

impl<P: IEmbeddingProvider> IEmbeddingProvider for std::sync::Arc<P> {
    async fn embed(&self, text: &str) -> RetrievalResult<Embedding> {
        (**self).embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
        (**self).embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
