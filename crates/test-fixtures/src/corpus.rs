use std::collections::HashMap;

use chrono::{Duration, Utc};

use acre_core::graph::{
    AgentNode, GraphNode, LocationNode, MarketDataNode, PropertyNode, RelationshipKind,
};
use acre_core::models::{DocumentChunk, SourceType};

use crate::graph_store::InMemoryGraphStore;
use crate::providers::KeywordEmbeddingProvider;
use crate::vector_store::InMemoryVectorStore;

/// A populated vector store and graph store over the same id space, so
/// hybrid searches can find cross-source agreement. The market report
/// `md_austin` exists in both stores under the same id.
pub struct SampleCorpus {
    pub vector: InMemoryVectorStore,
    pub graph: InMemoryGraphStore,
}

/// Austin/Dallas corpus used by integration tests across the workspace.
pub fn sample_corpus() -> SampleCorpus {
    let mut vector = InMemoryVectorStore::new();
    for (id, content, source_type, meta_key, meta_value) in [
        (
            "prop_austin_1",
            "Charming 3 bedroom house in Austin with an updated kitchen.",
            SourceType::Property,
            "address",
            "101 Hill St",
        ),
        (
            "prop_austin_2",
            "Spacious 4 bedroom home in Austin near downtown.",
            SourceType::Property,
            "address",
            "22 Lake Dr",
        ),
        (
            "prop_dallas_1",
            "Renovated 3 bedroom house in a quiet Dallas suburb.",
            SourceType::Property,
            "address",
            "9 Elm St",
        ),
        (
            "md_austin",
            "Austin market report: median price up 4%, inventory tightening.",
            SourceType::Market,
            "region_name",
            "Austin, TX",
        ),
        (
            "md_dallas",
            "Dallas market price trends held steady through the quarter.",
            SourceType::Market,
            "region_name",
            "Dallas, TX",
        ),
    ] {
        vector.add_chunk(DocumentChunk {
            id: id.to_string(),
            content: content.to_string(),
            embedding: KeywordEmbeddingProvider::embed_text(content),
            source_type,
            metadata: HashMap::from([(meta_key.to_string(), meta_value.to_string())]),
        });
    }

    let mut graph = InMemoryGraphStore::new();
    graph.add_node(GraphNode::Location(LocationNode {
        location_id: "loc_austin".into(),
        city: "Austin".into(),
        state: "TX".into(),
        content: "Austin, Texas metro area.".into(),
    }));
    graph.add_node(GraphNode::Location(LocationNode {
        location_id: "loc_dallas".into(),
        city: "Dallas".into(),
        state: "TX".into(),
        content: "Dallas, Texas metro area.".into(),
    }));
    graph.add_node(GraphNode::MarketData(MarketDataNode {
        market_data_id: "md_austin".into(),
        region_id: "Austin, TX".into(),
        content: "Median price $550,000, inventory 1,200, 31 days on market.".into(),
        median_price: Some(550_000.0),
        inventory_count: Some(1_200),
        days_on_market: Some(31.0),
        observed_at: Utc::now(),
    }));
    graph.add_node(GraphNode::MarketData(MarketDataNode {
        market_data_id: "md_austin_old".into(),
        region_id: "Austin, TX".into(),
        content: "Median price $530,000, inventory 1,450, 36 days on market.".into(),
        median_price: Some(530_000.0),
        inventory_count: Some(1_450),
        days_on_market: Some(36.0),
        observed_at: Utc::now() - Duration::days(90),
    }));
    graph.add_node(GraphNode::Property(PropertyNode {
        property_id: "prop_austin_1".into(),
        address: "101 Hill St".into(),
        content: "Charming 3 bedroom house with an updated kitchen.".into(),
        city: "Austin".into(),
        state: "TX".into(),
        price: Some(495_000.0),
    }));
    graph.add_node(GraphNode::Agent(AgentNode {
        agent_id: "agent_jane".into(),
        name: "Jane Rivera".into(),
        content: "Residential specialist covering Travis County.".into(),
    }));

    graph.add_edge("loc_austin", RelationshipKind::HasMarketData, "md_austin");
    graph.add_edge("loc_austin", RelationshipKind::HasMarketData, "md_austin_old");
    graph.add_edge("prop_austin_1", RelationshipKind::LocatedIn, "loc_austin");
    graph.add_edge("prop_austin_1", RelationshipKind::ListedBy, "agent_jane");

    SampleCorpus { vector, graph }
}
