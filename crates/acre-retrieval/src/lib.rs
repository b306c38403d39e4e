//! # acre-retrieval
//!
//! The hybrid retrieval pipeline: a strategy router classifies the query,
//! vector and graph retrievers gather candidates (concurrently in hybrid
//! mode), and an adaptive fusion ranker merges them into one ordered list.
//! Every failure along the way degrades to an empty candidate set; the
//! caller sees a ranked list or `[]`, never an error.

pub mod engine;
pub mod entities;
pub mod fusion;
pub mod graph;
pub mod router;
pub mod vector;

pub use engine::RetrievalEngine;
pub use entities::EntityExtractor;
pub use fusion::FusionRanker;
pub use graph::GraphRetriever;
pub use router::QueryStrategyRouter;
pub use vector::VectorRetriever;
