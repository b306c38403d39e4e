//! Entity-keyed retrieval over the property graph.

use std::collections::HashMap;

use tracing::{debug, warn};

use acre_core::errors::{RetrievalError, RetrievalResult};
use acre_core::graph::LocationMarket;
use acre_core::models::{EntitySet, ResultType, SearchResult};
use acre_core::traits::IGraphStore;

use crate::entities::EntityExtractor;

// Relevance assigned per traversal shape.
const SCORE_LOCATION_WITH_MARKET: f64 = 0.9;
const SCORE_LOCATION_BARE: f64 = 0.7;
const SCORE_PROPERTY: f64 = 0.95;
const SCORE_AGENT: f64 = 0.9;
const SCORE_METRIC_LOCATION: f64 = 0.8;
const SCORE_FALLBACK_SCAN: f64 = 0.6;

/// Retrieves candidates by dispatching one typed graph sub-query per entity
/// kind found in the query.
pub struct GraphRetriever<G> {
    store: G,
    extractor: EntityExtractor,
}

impl<G: IGraphStore> GraphRetriever<G> {
    pub fn new(store: G) -> Self {
        Self {
            store,
            extractor: EntityExtractor::new(),
        }
    }

    /// Run entity extraction and the matching sub-queries.
    ///
    /// Sub-queries are isolated: one failing is logged and contributes
    /// nothing, but a call where every sub-query failed returns an error
    /// so the caller can report the outage. A query with no recognized
    /// entities falls back to a content scan across all node kinds.
    /// Results are concatenated in sub-query order and truncated to
    /// `limit`.
    ///
    /// `filters` is accepted for signature parity with the vector side;
    /// graph nodes carry no metadata map to match it against. `max_depth`
    /// caps traversal: below 2, joined context (market snapshots, listing
    /// agents, listing counts) is not followed and entities come back
    /// bare.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        _filters: &HashMap<String, String>,
        max_depth: usize,
    ) -> RetrievalResult<Vec<SearchResult>> {
        let entities = EntitySet::from_entities(&self.extractor.extract(query));
        let follow_joins = max_depth >= 2;

        if entities.is_empty() {
            debug!(query, "no entities extracted, scanning graph content");
            let nodes = self.store.scan_content(query, limit).await?;
            return Ok(nodes
                .into_iter()
                .map(|n| n.into_search_result(SCORE_FALLBACK_SCAN))
                .collect());
        }

        let mut results = Vec::new();
        let mut failed_sub_queries = 0usize;

        for location in &entities.locations {
            let (city, state) = split_location(location);
            match self.store.market_snapshot(city, state, limit).await {
                Ok(snapshots) => {
                    results.extend(snapshots.into_iter().map(|mut snapshot| {
                        if !follow_joins {
                            snapshot.market = None;
                        }
                        location_result(snapshot)
                    }));
                }
                Err(e) => {
                    failed_sub_queries += 1;
                    warn!(location, error = %e, "market snapshot sub-query failed");
                }
            }
        }

        for reference in &entities.property_refs {
            match self.store.find_property(reference).await {
                Ok(Some(found)) => {
                    let mut content = found.property.content.clone();
                    if follow_joins {
                        if let Some(agent) = &found.agent {
                            content.push_str(&format!(" Listed by {}.", agent.name));
                        }
                        if let Some(location) = &found.location {
                            content
                                .push_str(&format!(" In {}, {}.", location.city, location.state));
                        }
                    }
                    results.push(SearchResult {
                        result_id: found.property.property_id,
                        content,
                        result_type: ResultType::Property,
                        title: found.property.address,
                        source: "Graph Database".to_string(),
                        similarity_score: None,
                        relevance_score: Some(SCORE_PROPERTY),
                        created_at: None,
                    });
                }
                Ok(None) => debug!(reference, "no property matched reference"),
                Err(e) => {
                    failed_sub_queries += 1;
                    warn!(reference, error = %e, "property sub-query failed");
                }
            }
        }

        for name in &entities.agents {
            match self.store.agents_named(name, limit).await {
                Ok(listings) => {
                    results.extend(listings.into_iter().map(|found| {
                        let mut result = acre_core::graph::GraphNode::Agent(found.agent)
                            .into_search_result(SCORE_AGENT);
                        if follow_joins {
                            result
                                .content
                                .push_str(&format!(" Active listings: {}.", found.listing_count));
                        }
                        result
                    }));
                }
                Err(e) => {
                    failed_sub_queries += 1;
                    warn!(name, error = %e, "agent sub-query failed");
                }
            }
        }

        if !entities.metrics.is_empty() && !entities.locations.is_empty() {
            match self
                .store
                .market_data_mentioning(&entities.metrics, &entities.locations, limit)
                .await
            {
                Ok(nodes) => {
                    results.extend(
                        nodes
                            .into_iter()
                            .map(|n| n.into_search_result(SCORE_METRIC_LOCATION)),
                    );
                }
                Err(e) => {
                    failed_sub_queries += 1;
                    warn!(error = %e, "metric sub-query failed");
                }
            }
        }

        if results.is_empty() && failed_sub_queries > 0 {
            return Err(RetrievalError::query("every graph sub-query failed"));
        }

        results.truncate(limit);
        debug!(query, results = results.len(), "graph search complete");
        Ok(results)
    }
}

/// Split a normalized `"City, ST"` value; a bare name has no state part.
fn split_location(location: &str) -> (&str, Option<&str>) {
    match location.split_once(',') {
        Some((city, state)) => (city.trim(), Some(state.trim())),
        None => (location.trim(), None),
    }
}

fn location_result(snapshot: LocationMarket) -> SearchResult {
    let LocationMarket { location, market } = snapshot;
    let title = format!("{}, {} Market Data", location.city, location.state);
    match market {
        Some(market) => {
            let mut result = acre_core::graph::GraphNode::MarketData(market)
                .into_search_result(SCORE_LOCATION_WITH_MARKET);
            result.title = title;
            result
        }
        None => {
            let mut result = acre_core::graph::GraphNode::Location(location)
                .into_search_result(SCORE_LOCATION_BARE);
            result.title = title;
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_location_handles_both_shapes() {
        assert_eq!(split_location("Austin, TX"), ("Austin", Some("TX")));
        assert_eq!(split_location("Austin"), ("Austin", None));
    }
}
