//! Search request and result models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants;

/// Kind of evidence a search result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Property,
    MarketData,
    Agent,
    MetricData,
    GraphFact,
    Document,
}

/// A caller-facing retrieval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query: String,
    /// Maximum number of results to return.
    pub limit: usize,
    /// Equality predicates matched against chunk metadata.
    pub filters: HashMap<String, String>,
    /// Minimum cosine similarity for vector matches.
    pub similarity_threshold: f64,
    /// Maximum graph traversal depth.
    pub max_depth: usize,
    /// Opaque caller context (user role etc.), reserved for routing.
    pub context: HashMap<String, String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: constants::DEFAULT_RESULT_LIMIT,
            filters: HashMap::new(),
            similarity_threshold: constants::DEFAULT_SIMILARITY_THRESHOLD,
            max_depth: constants::DEFAULT_MAX_DEPTH,
            context: HashMap::new(),
        }
    }
}

impl SearchRequest {
    /// A request with defaults for everything but the query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Add a metadata equality filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// One ranked piece of evidence. Owned transiently per request; never
/// persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub result_id: String,
    pub content: String,
    pub result_type: ResultType,
    pub title: String,
    pub source: String,
    /// Cosine similarity from the vector store, when vector-sourced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    /// Graph relevance, or the fused combined score after ranking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SearchResult {
    /// The score fusion treats as this result's vector contribution basis.
    pub fn similarity_or_default(&self) -> f64 {
        self.similarity_score
            .unwrap_or(constants::DEFAULT_SIMILARITY_FALLBACK)
    }

    /// The score fusion treats as this result's graph contribution basis.
    pub fn relevance_or_default(&self) -> f64 {
        self.relevance_score
            .unwrap_or(constants::DEFAULT_SIMILARITY_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req = SearchRequest::new("median price in Austin, TX");
        assert_eq!(req.limit, 10);
        assert!((req.similarity_threshold - 0.7).abs() < f64::EPSILON);
        assert!(req.filters.is_empty());
    }

    #[test]
    fn result_type_snake_case_wire_format() {
        let json = serde_json::to_string(&ResultType::MarketData).unwrap();
        assert_eq!(json, "\"market_data\"");
        let back: ResultType = serde_json::from_str("\"graph_fact\"").unwrap();
        assert_eq!(back, ResultType::GraphFact);
    }

    #[test]
    fn missing_similarity_defaults_to_half() {
        let result = SearchResult {
            result_id: "prop_1".into(),
            content: "3br".into(),
            result_type: ResultType::Property,
            title: "123 Main St".into(),
            source: "Property Listing".into(),
            similarity_score: None,
            relevance_score: None,
            created_at: None,
        };
        assert!((result.similarity_or_default() - 0.5).abs() < f64::EPSILON);
    }
}
