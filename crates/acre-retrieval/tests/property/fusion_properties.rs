//! Property tests for fusion ranking and strategy routing.

use std::collections::HashMap;

use proptest::prelude::*;

use acre_core::models::{ResultType, SearchResult};
use acre_retrieval::{FusionRanker, QueryStrategyRouter};

fn vector_result(id: u8, similarity: f64) -> SearchResult {
    SearchResult {
        result_id: format!("r{id:03}"),
        content: String::new(),
        result_type: ResultType::Property,
        title: String::new(),
        source: "Property Listing".to_string(),
        similarity_score: Some(similarity),
        relevance_score: None,
        created_at: None,
    }
}

fn graph_result(id: u8, relevance: f64) -> SearchResult {
    SearchResult {
        result_id: format!("r{id:03}"),
        content: String::new(),
        result_type: ResultType::GraphFact,
        title: String::new(),
        source: "Graph Database".to_string(),
        similarity_score: None,
        relevance_score: Some(relevance),
        created_at: None,
    }
}

fn candidate_list(
    to_result: fn(u8, f64) -> SearchResult,
) -> impl Strategy<Value = Vec<SearchResult>> {
    proptest::collection::vec((0u8..30, 0.0f64..=1.0), 0..15).prop_map(move |items| {
        let mut seen = std::collections::HashSet::new();
        items
            .into_iter()
            .filter(|(id, _)| seen.insert(*id))
            .map(|(id, score)| to_result(id, score))
            .collect()
    })
}

proptest! {
    #[test]
    fn fused_output_is_sorted_by_combined_score(
        vector in candidate_list(vector_result),
        graph in candidate_list(graph_result),
        limit in 1usize..20,
    ) {
        let fused = FusionRanker::default().fuse(vector, graph, limit);
        prop_assert!(fused.len() <= limit);
        let scores: Vec<f64> = fused.iter().filter_map(|r| r.relevance_score).collect();
        prop_assert_eq!(scores.len(), fused.len());
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn adapted_weights_are_a_convex_pair(
        vector_count in 0usize..100,
        graph_count in 0usize..100,
    ) {
        let (vw, gw) = FusionRanker::default().adapt_weights(vector_count, graph_count);
        prop_assert!((vw + gw - 1.0).abs() < 1e-9);
        prop_assert!((0.0..=1.0).contains(&vw));
        prop_assert!((0.0..=1.0).contains(&gw));
    }

    #[test]
    fn empty_vector_side_passes_graph_scores_through(
        graph in candidate_list(graph_result),
    ) {
        let fused = FusionRanker::default().fuse(Vec::new(), graph.clone(), graph.len().max(1));
        prop_assert_eq!(fused.len(), graph.len());
        // at graph weight 1.0 every fused score equals its raw relevance
        for result in &fused {
            let original = graph
                .iter()
                .find(|g| g.result_id == result.result_id)
                .and_then(|g| g.relevance_score)
                .unwrap_or(0.5);
            prop_assert!((result.relevance_score.unwrap() - original).abs() < 1e-9);
        }
    }

    #[test]
    fn cross_source_boost_is_never_negative(
        similarity in 0.0f64..=1.0,
        relevance in 0.0f64..=1.0,
        padding in candidate_list(vector_result),
    ) {
        let mut vector = padding;
        vector.retain(|r| r.result_id != "shared");
        vector.push(vector_result(255, similarity));
        let mut shared = vector.last().cloned().unwrap();
        shared.result_id = "shared".to_string();
        vector.push(shared);
        let graph = vec![{
            let mut g = graph_result(255, relevance);
            g.result_id = "shared".to_string();
            g
        }];

        let ranker = FusionRanker::default();
        let (vw, _) = ranker.adapt_weights(vector.len(), graph.len());
        let fused = ranker.fuse(vector, graph, 100);
        let combined = fused
            .iter()
            .find(|r| r.result_id == "shared")
            .and_then(|r| r.relevance_score)
            .unwrap();
        prop_assert!(combined >= similarity * vw - 1e-9);
    }

    #[test]
    fn router_is_pure(query in ".{0,80}") {
        let router = QueryStrategyRouter::new();
        let context = HashMap::new();
        prop_assert_eq!(
            router.classify(&query, &context),
            router.classify(&query, &context)
        );
    }
}
