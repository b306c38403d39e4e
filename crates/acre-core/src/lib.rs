//! # acre-core
//!
//! Foundation crate for the Acre hybrid retrieval engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod graph;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EngineConfig;
pub use errors::{RetrievalError, RetrievalResult};
pub use models::{
    DocumentChunk, EntitySet, EntityType, ExtractedEntity, QueryStrategy, ResultType,
    SearchRequest, SearchResult, SearchTelemetry, SourceType,
};
