//! In-memory reference implementations of the engine's collaborator traits,
//! plus a small sample corpus, shared by tests across the workspace.

mod corpus;
mod graph_store;
mod providers;
mod vector_store;

pub use corpus::{sample_corpus, SampleCorpus};
pub use graph_store::{FailingGraphStore, InMemoryGraphStore};
pub use providers::{CountingProvider, FailingProvider, FailingSink, KeywordEmbeddingProvider};
pub use vector_store::{FailingVectorStore, InMemoryVectorStore};
