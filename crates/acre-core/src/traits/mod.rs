//! Component seams of the engine. Concrete backends (vector database,
//! graph database, embedding API, analytics sink) implement these; the
//! retrieval crate is written against them.

mod analytics;
mod embedding;
mod graph_store;
mod vector_store;

pub use analytics::IAnalyticsSink;
pub use embedding::IEmbeddingProvider;
pub use graph_store::IGraphStore;
pub use vector_store::IVectorStore;
