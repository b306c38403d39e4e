//! Adaptive score fusion of the two candidate lists.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use acre_core::constants::{CROSS_SOURCE_BOOST, WEIGHT_SHIFT_DOWN, WEIGHT_SHIFT_UP};
use acre_core::models::SearchResult;

/// One merged candidate, keyed by `result_id`, alive only for the duration
/// of a single fuse call.
struct FusionCandidate {
    result: SearchResult,
    vector_contribution: Option<f64>,
    graph_contribution: Option<f64>,
}

impl FusionCandidate {
    fn combined_score(&self) -> f64 {
        match (self.vector_contribution, self.graph_contribution) {
            // found by both sources: confirmation boost on the graph side
            (Some(v), Some(g)) => v + g * CROSS_SOURCE_BOOST,
            (Some(v), None) => v,
            (None, Some(g)) => g,
            (None, None) => 0.0,
        }
    }
}

/// Merges vector and graph candidates into one ranked list.
///
/// Weights adapt to what the sources actually returned: an empty side
/// collapses all weight onto the other, and a side with more than twice
/// the other's candidates pulls weight toward itself. Agreement between
/// the two sources on a `result_id` is rewarded with a boost.
#[derive(Debug, Clone, Copy)]
pub struct FusionRanker {
    vector_weight: f64,
    graph_weight: f64,
}

impl FusionRanker {
    pub fn new(vector_weight: f64, graph_weight: f64) -> Self {
        Self {
            vector_weight,
            graph_weight,
        }
    }

    /// Adapted `(vector_weight, graph_weight)` for the given candidate
    /// counts. Always sums to 1.
    pub fn adapt_weights(&self, vector_count: usize, graph_count: usize) -> (f64, f64) {
        if vector_count == 0 && graph_count == 0 {
            return (self.vector_weight, self.graph_weight);
        }
        if vector_count == 0 {
            return (0.0, 1.0);
        }
        if graph_count == 0 {
            return (1.0, 0.0);
        }

        let (mut vw, mut gw) = (self.vector_weight, self.graph_weight);
        if vector_count > 2 * graph_count {
            vw *= WEIGHT_SHIFT_UP;
            gw *= WEIGHT_SHIFT_DOWN;
        } else if graph_count > 2 * vector_count {
            gw *= WEIGHT_SHIFT_UP;
            vw *= WEIGHT_SHIFT_DOWN;
        }
        let total = vw + gw;
        (vw / total, gw / total)
    }

    /// Fuse the two lists, best first, at most `limit` entries. The fused
    /// combined score is written to each result's `relevance_score`.
    pub fn fuse(
        &self,
        vector_results: Vec<SearchResult>,
        graph_results: Vec<SearchResult>,
        limit: usize,
    ) -> Vec<SearchResult> {
        let (vector_weight, graph_weight) =
            self.adapt_weights(vector_results.len(), graph_results.len());
        debug!(
            vector_count = vector_results.len(),
            graph_count = graph_results.len(),
            vector_weight,
            graph_weight,
            "fusing candidate lists"
        );

        let mut candidates: HashMap<String, FusionCandidate> = HashMap::new();

        // a result_id listed more than once on a side keeps its strongest
        // contribution, never the last one seen
        for result in vector_results {
            let contribution = result.similarity_or_default() * vector_weight;
            match candidates.get_mut(&result.result_id) {
                Some(candidate) => {
                    candidate.vector_contribution = Some(
                        candidate
                            .vector_contribution
                            .map_or(contribution, |v| v.max(contribution)),
                    );
                }
                None => {
                    candidates.insert(
                        result.result_id.clone(),
                        FusionCandidate {
                            result,
                            vector_contribution: Some(contribution),
                            graph_contribution: None,
                        },
                    );
                }
            }
        }

        for result in graph_results {
            let contribution = result.relevance_or_default() * graph_weight;
            match candidates.get_mut(&result.result_id) {
                Some(candidate) => {
                    candidate.graph_contribution = Some(
                        candidate
                            .graph_contribution
                            .map_or(contribution, |g| g.max(contribution)),
                    );
                }
                None => {
                    candidates.insert(
                        result.result_id.clone(),
                        FusionCandidate {
                            result,
                            vector_contribution: None,
                            graph_contribution: Some(contribution),
                        },
                    );
                }
            }
        }

        let mut ranked: Vec<(f64, SearchResult)> = candidates
            .into_values()
            .map(|candidate| {
                let score = candidate.combined_score();
                let mut result = candidate.result;
                result.relevance_score = Some(score);
                (score, result)
            })
            .collect();

        // combined score descending, then result_id ascending on ties
        ranked.sort_by(|(a_score, a), (b_score, b)| {
            b_score
                .partial_cmp(a_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.result_id.cmp(&b.result_id))
        });

        ranked
            .into_iter()
            .take(limit)
            .map(|(_, result)| result)
            .collect()
    }
}

impl Default for FusionRanker {
    fn default() -> Self {
        Self::new(
            acre_core::constants::DEFAULT_VECTOR_WEIGHT,
            acre_core::constants::DEFAULT_GRAPH_WEIGHT,
        )
    }
}
