use crate::errors::RetrievalResult;
use crate::graph::{AgentListings, GraphNode, LocationMarket, PropertyMatch};

/// Labeled property graph with typed query patterns.
///
/// Each method is one traversal shape; relevance scoring of the returned
/// nodes is the caller's concern, not the store's.
pub trait IGraphStore: Send + Sync {
    /// Locations matching `city` (and `state` when given), each joined to
    /// its most recent market data node.
    async fn market_snapshot(
        &self,
        city: &str,
        state: Option<&str>,
        limit: usize,
    ) -> RetrievalResult<Vec<LocationMarket>>;

    /// Look up one property by listing id or street address, joined to its
    /// listing agent and location.
    async fn find_property(&self, reference: &str) -> RetrievalResult<Option<PropertyMatch>>;

    /// Agents whose name contains `name` (case-insensitive), with their
    /// listing counts.
    async fn agents_named(&self, name: &str, limit: usize) -> RetrievalResult<Vec<AgentListings>>;

    /// Market data nodes whose metrics match any of `metrics` and whose
    /// region matches any of `locations`, newest first.
    async fn market_data_mentioning(
        &self,
        metrics: &[String],
        locations: &[String],
        limit: usize,
    ) -> RetrievalResult<Vec<GraphNode>>;

    /// Fallback substring scan over node content for queries no typed
    /// pattern covers.
    async fn scan_content(&self, text: &str, limit: usize) -> RetrievalResult<Vec<GraphNode>>;
}

impl<S: IGraphStore> IGraphStore for std::sync::Arc<S> {
    async fn market_snapshot(
        &self,
        city: &str,
        state: Option<&str>,
        limit: usize,
    ) -> RetrievalResult<Vec<LocationMarket>> {
        (**self).market_snapshot(city, state, limit).await
    }

    async fn find_property(&self, reference: &str) -> RetrievalResult<Option<PropertyMatch>> {
        (**self).find_property(reference).await
    }

    async fn agents_named(&self, name: &str, limit: usize) -> RetrievalResult<Vec<AgentListings>> {
        (**self).agents_named(name, limit).await
    }

    async fn market_data_mentioning(
        &self,
        metrics: &[String],
        locations: &[String],
        limit: usize,
    ) -> RetrievalResult<Vec<GraphNode>> {
        (**self).market_data_mentioning(metrics, locations, limit).await
    }

    async fn scan_content(&self, text: &str, limit: usize) -> RetrievalResult<Vec<GraphNode>> {
        (**self).scan_content(text, limit).await
    }
}
