//! # acre-embeddings
//!
//! Embedding acquisition for the retrieval engine: a TTL'd cache with
//! per-model disk partitions, dimension normalization, and a throttled
//! engine that fronts any [`acre_core::traits::IEmbeddingProvider`].

pub mod cache;
pub mod engine;
pub mod normalize;
pub mod providers;

pub use cache::{CacheStats, EmbeddingCache};
pub use engine::EmbeddingEngine;
pub use normalize::normalize_dimensions;
pub use providers::OpenAiHttpProvider;
