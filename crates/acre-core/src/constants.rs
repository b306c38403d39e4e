//! System-wide defaults shared by config and components.

/// Embedding vector length used by the vector store.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;

/// Minimum cosine similarity for a chunk to count as a vector match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Base fusion weight for vector results.
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.6;

/// Base fusion weight for graph results.
pub const DEFAULT_GRAPH_WEIGHT: f64 = 0.4;

/// Multiplier applied to the graph contribution of a result found by both
/// sources (cross-source confirmation boost).
pub const CROSS_SOURCE_BOOST: f64 = 1.2;

/// Weight shift multipliers when one source returns more than twice as many
/// candidates as the other.
pub const WEIGHT_SHIFT_UP: f64 = 1.2;
pub const WEIGHT_SHIFT_DOWN: f64 = 0.8;

/// Similarity assumed for a vector result missing its score.
pub const DEFAULT_SIMILARITY_FALLBACK: f64 = 0.5;

/// Maximum results returned by a search when not specified.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Maximum graph traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Embedding cache time-to-live.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400; // 24 hours

/// Embedding cache capacity ceiling.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Fraction of entries evicted in one bulk pass when the ceiling is hit.
pub const CACHE_EVICTION_FRACTION: f64 = 0.2;

/// Interval between disk persistence passes for dirty cache partitions.
pub const DEFAULT_CACHE_PERSIST_INTERVAL_SECS: u64 = 60;

/// Sub-batch size for batch embedding generation.
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 50;

/// Concurrency ceiling for in-flight embedding sub-batches.
pub const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 3;

/// Minimum interval between embedding provider calls.
pub const DEFAULT_MIN_CALL_INTERVAL_MS: u64 = 100;

/// Per-retriever deadline inside one search call.
pub const DEFAULT_RETRIEVER_TIMEOUT_SECS: u64 = 10;

/// Utterances that bypass retrieval entirely (compared trimmed and
/// lowercased).
pub const GREETINGS: [&str; 6] = ["hi", "hello", "hey", "hi agent", "hello agent", "hey agent"];
