//! Data models shared across the workspace.

mod chunk;
mod embedding;
mod entity;
mod search;
mod strategy;
mod telemetry;

pub use chunk::{DocumentChunk, ScoredChunk, SourceType};
pub use embedding::Embedding;
pub use entity::{EntitySet, EntityType, ExtractedEntity};
pub use search::{ResultType, SearchRequest, SearchResult};
pub use strategy::QueryStrategy;
pub use telemetry::SearchTelemetry;
