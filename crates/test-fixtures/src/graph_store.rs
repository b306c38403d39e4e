use acre_core::errors::{RetrievalError, RetrievalResult};
use acre_core::graph::{
    AgentListings, AgentNode, GraphNode, LocationMarket, LocationNode, MarketDataNode,
    PropertyMatch, PropertyNode, RelationshipKind,
};
use acre_core::traits::IGraphStore;

/// A labeled property graph held in memory: a node list plus
/// `(from, kind, to)` edge triples over node ids.
#[derive(Default)]
pub struct InMemoryGraphStore {
    nodes: Vec<GraphNode>,
    edges: Vec<(String, RelationshipKind, String)>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, from: &str, kind: RelationshipKind, to: &str) {
        self.edges
            .push((from.to_string(), kind, to.to_string()));
    }

    fn locations(&self) -> impl Iterator<Item = &LocationNode> {
        self.nodes.iter().filter_map(|n| match n {
            GraphNode::Location(l) => Some(l),
            _ => None,
        })
    }

    fn market_data(&self) -> impl Iterator<Item = &MarketDataNode> {
        self.nodes.iter().filter_map(|n| match n {
            GraphNode::MarketData(m) => Some(m),
            _ => None,
        })
    }

    fn properties(&self) -> impl Iterator<Item = &PropertyNode> {
        self.nodes.iter().filter_map(|n| match n {
            GraphNode::Property(p) => Some(p),
            _ => None,
        })
    }

    fn agents(&self) -> impl Iterator<Item = &AgentNode> {
        self.nodes.iter().filter_map(|n| match n {
            GraphNode::Agent(a) => Some(a),
            _ => None,
        })
    }

    fn edge_targets(&self, from: &str, kind: RelationshipKind) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(f, k, _)| f == from && *k == kind)
            .map(|(_, _, t)| t.as_str())
            .collect()
    }
}

impl IGraphStore for InMemoryGraphStore {
    async fn market_snapshot(
        &self,
        city: &str,
        state: Option<&str>,
        limit: usize,
    ) -> RetrievalResult<Vec<LocationMarket>> {
        let snapshots: Vec<LocationMarket> = self
            .locations()
            .filter(|l| l.city.eq_ignore_ascii_case(city))
            .filter(|l| state.map_or(true, |s| l.state.eq_ignore_ascii_case(s)))
            .take(limit)
            .map(|location| {
                let linked = self.edge_targets(&location.location_id, RelationshipKind::HasMarketData);
                let market = self
                    .market_data()
                    .filter(|m| linked.contains(&m.market_data_id.as_str()))
                    .max_by_key(|m| m.observed_at)
                    .cloned();
                LocationMarket {
                    location: location.clone(),
                    market,
                }
            })
            .collect();
        Ok(snapshots)
    }

    async fn find_property(&self, reference: &str) -> RetrievalResult<Option<PropertyMatch>> {
        let reference_lower = reference.to_lowercase();
        let Some(property) = self.properties().find(|p| {
            p.property_id == reference || p.address.to_lowercase().contains(&reference_lower)
        }) else {
            return Ok(None);
        };

        let agent = self
            .edge_targets(&property.property_id, RelationshipKind::ListedBy)
            .first()
            .and_then(|id| self.agents().find(|a| a.agent_id == *id))
            .cloned();
        let location = self
            .edge_targets(&property.property_id, RelationshipKind::LocatedIn)
            .first()
            .and_then(|id| self.locations().find(|l| l.location_id == *id))
            .cloned();

        Ok(Some(PropertyMatch {
            property: property.clone(),
            agent,
            location,
        }))
    }

    async fn agents_named(&self, name: &str, limit: usize) -> RetrievalResult<Vec<AgentListings>> {
        let name_lower = name.to_lowercase();
        let listings: Vec<AgentListings> = self
            .agents()
            .filter(|a| a.name.to_lowercase().contains(&name_lower))
            .take(limit)
            .map(|agent| {
                let listing_count = self
                    .edges
                    .iter()
                    .filter(|(_, k, t)| *k == RelationshipKind::ListedBy && *t == agent.agent_id)
                    .count();
                AgentListings {
                    agent: agent.clone(),
                    listing_count,
                }
            })
            .collect();
        Ok(listings)
    }

    async fn market_data_mentioning(
        &self,
        metrics: &[String],
        locations: &[String],
        limit: usize,
    ) -> RetrievalResult<Vec<GraphNode>> {
        let mut matches: Vec<&MarketDataNode> = self
            .market_data()
            .filter(|m| {
                let content = m.content.to_lowercase();
                let region = m.region_id.to_lowercase();
                let metric_hit = metrics.iter().any(|k| content.contains(&k.to_lowercase()));
                let location_hit = locations.iter().any(|l| {
                    let l = l.to_lowercase();
                    let city = l.split(',').next().unwrap_or(&l).trim().to_string();
                    region.contains(&city) || content.contains(&city)
                });
                metric_hit && location_hit
            })
            .collect();
        matches.sort_by_key(|m| std::cmp::Reverse(m.observed_at));
        Ok(matches
            .into_iter()
            .take(limit)
            .map(|m| GraphNode::MarketData(m.clone()))
            .collect())
    }

    async fn scan_content(&self, text: &str, limit: usize) -> RetrievalResult<Vec<GraphNode>> {
        let text_lower = text.to_lowercase();
        Ok(self
            .nodes
            .iter()
            .filter(|n| n.content().to_lowercase().contains(&text_lower))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// A graph store whose every call fails, for degradation tests.
pub struct FailingGraphStore;

impl IGraphStore for FailingGraphStore {
    async fn market_snapshot(
        &self,
        _city: &str,
        _state: Option<&str>,
        _limit: usize,
    ) -> RetrievalResult<Vec<LocationMarket>> {
        Err(RetrievalError::connectivity("graph", "store offline"))
    }

    async fn find_property(&self, _reference: &str) -> RetrievalResult<Option<PropertyMatch>> {
        Err(RetrievalError::connectivity("graph", "store offline"))
    }

    async fn agents_named(&self, _name: &str, _limit: usize) -> RetrievalResult<Vec<AgentListings>> {
        Err(RetrievalError::connectivity("graph", "store offline"))
    }

    async fn market_data_mentioning(
        &self,
        _metrics: &[String],
        _locations: &[String],
        _limit: usize,
    ) -> RetrievalResult<Vec<GraphNode>> {
        Err(RetrievalError::connectivity("graph", "store offline"))
    }

    async fn scan_content(&self, _text: &str, _limit: usize) -> RetrievalResult<Vec<GraphNode>> {
        Err(RetrievalError::connectivity("graph", "store offline"))
    }
}
