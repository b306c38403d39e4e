//! Typed graph node and edge model.
//!
//! Each node kind is a tagged variant with an explicit field mapping into
//! the uniform [`SearchResult`], replacing dynamic row lookups. Traversals
//! are read-only; the graph store owns the data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ResultType, SearchResult};

/// Typed edges of the property graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    LocatedIn,
    ListedBy,
    WorksFor,
    HasHistory,
    HasMarketData,
    HasMetric,
    ForLocation,
}

/// A property listing node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyNode {
    pub property_id: String,
    pub address: String,
    pub content: String,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A city/locality node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationNode {
    pub location_id: String,
    pub city: String,
    pub state: String,
    pub content: String,
}

/// A listing agent node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentNode {
    pub agent_id: String,
    pub name: String,
    pub content: String,
}

/// A brokerage office node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeNode {
    pub office_id: String,
    pub name: String,
    pub content: String,
}

/// A dated market statistics node for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataNode {
    pub market_data_id: String,
    pub region_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_on_market: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

/// A named market metric node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricNode {
    pub metric_id: String,
    pub name: String,
    pub content: String,
}

/// A metro/county region node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionNode {
    pub region_id: String,
    pub name: String,
    pub content: String,
}

/// A listing history event node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEventNode {
    pub event_id: String,
    pub property_id: String,
    pub content: String,
    pub occurred_at: DateTime<Utc>,
}

/// Any node of the property graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphNode {
    Property(PropertyNode),
    Location(LocationNode),
    Agent(AgentNode),
    Office(OfficeNode),
    MarketData(MarketDataNode),
    Metric(MetricNode),
    Region(RegionNode),
    HistoryEvent(HistoryEventNode),
}

impl GraphNode {
    /// Stable node identifier, shared with the vector store's id space for
    /// chunks derived from the same record.
    pub fn node_id(&self) -> &str {
        match self {
            GraphNode::Property(n) => &n.property_id,
            GraphNode::Location(n) => &n.location_id,
            GraphNode::Agent(n) => &n.agent_id,
            GraphNode::Office(n) => &n.office_id,
            GraphNode::MarketData(n) => &n.market_data_id,
            GraphNode::Metric(n) => &n.metric_id,
            GraphNode::Region(n) => &n.region_id,
            GraphNode::HistoryEvent(n) => &n.event_id,
        }
    }

    /// Free-text content carried by the node.
    pub fn content(&self) -> &str {
        match self {
            GraphNode::Property(n) => &n.content,
            GraphNode::Location(n) => &n.content,
            GraphNode::Agent(n) => &n.content,
            GraphNode::Office(n) => &n.content,
            GraphNode::MarketData(n) => &n.content,
            GraphNode::Metric(n) => &n.content,
            GraphNode::Region(n) => &n.content,
            GraphNode::HistoryEvent(n) => &n.content,
        }
    }

    /// Map this node into a uniform search result at the given relevance.
    pub fn into_search_result(self, relevance_score: f64) -> SearchResult {
        let (result_type, title, created_at) = match &self {
            GraphNode::Property(n) => (ResultType::Property, n.address.clone(), None),
            GraphNode::Location(n) => (
                ResultType::GraphFact,
                format!("{}, {} Market Data", n.city, n.state),
                None,
            ),
            GraphNode::Agent(n) => (
                ResultType::Agent,
                format!("{} - Real Estate Agent", n.name),
                None,
            ),
            GraphNode::Office(n) => (ResultType::GraphFact, n.name.clone(), None),
            GraphNode::MarketData(n) => (
                ResultType::MarketData,
                format!("{} Market Report", n.region_id),
                Some(n.observed_at),
            ),
            GraphNode::Metric(n) => (ResultType::MetricData, n.name.clone(), None),
            GraphNode::Region(n) => (ResultType::GraphFact, n.name.clone(), None),
            GraphNode::HistoryEvent(n) => (
                ResultType::GraphFact,
                format!("History for {}", n.property_id),
                Some(n.occurred_at),
            ),
        };

        SearchResult {
            result_id: self.node_id().to_string(),
            content: self.content().to_string(),
            result_type,
            title,
            source: "Graph Database".to_string(),
            similarity_score: None,
            relevance_score: Some(relevance_score),
            created_at,
        }
    }
}

/// A location with its most recent market data node, if any. Returned by
/// `IGraphStore::market_snapshot`.
#[derive(Debug, Clone)]
pub struct LocationMarket {
    pub location: LocationNode,
    pub market: Option<MarketDataNode>,
}

/// A property joined to its agent and location. Returned by
/// `IGraphStore::find_property`.
#[derive(Debug, Clone)]
pub struct PropertyMatch {
    pub property: PropertyNode,
    pub agent: Option<AgentNode>,
    pub location: Option<LocationNode>,
}

/// An agent joined to the properties they list. Returned by
/// `IGraphStore::agents_named`.
#[derive(Debug, Clone)]
pub struct AgentListings {
    pub agent: AgentNode,
    pub listing_count: usize,
}
