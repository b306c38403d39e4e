//! Orchestration facade: routing, dispatch, resilience, telemetry.

use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, info, warn};

use acre_core::config::EngineConfig;
use acre_core::constants::GREETINGS;
use acre_core::models::{QueryStrategy, SearchRequest, SearchResult, SearchTelemetry};
use acre_core::traits::{IAnalyticsSink, IEmbeddingProvider, IGraphStore, IVectorStore};
use acre_embeddings::EmbeddingEngine;

use crate::fusion::FusionRanker;
use crate::graph::GraphRetriever;
use crate::router::QueryStrategyRouter;
use crate::vector::VectorRetriever;

/// What one retriever channel produced: its results plus a failure note
/// when it was degraded to empty, so telemetry can tell "failed" from
/// "legitimately empty".
struct ChannelOutcome {
    results: Vec<SearchResult>,
    failure: Option<String>,
}

impl ChannelOutcome {
    fn ok(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            failure: None,
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            results: Vec::new(),
            failure: Some(reason),
        }
    }
}

/// The retrieval engine facade.
///
/// Stateless per call apart from cache contents; every collaborator is
/// injected at construction, so tests can wire isolated engines. The
/// public contract: a ranked list or `[]`, never an error.
pub struct RetrievalEngine<V, G, P, A> {
    router: QueryStrategyRouter,
    vector: VectorRetriever<V, P>,
    graph: GraphRetriever<G>,
    fusion: FusionRanker,
    analytics: A,
    config: EngineConfig,
}

impl<V, G, P, A> RetrievalEngine<V, G, P, A>
where
    V: IVectorStore,
    G: IGraphStore,
    P: IEmbeddingProvider,
    A: IAnalyticsSink,
{
    pub fn new(vector_store: V, graph_store: G, provider: P, analytics: A, config: EngineConfig) -> Self {
        let embedder = EmbeddingEngine::new(
            provider,
            config.embedding.clone(),
            config.cache.clone(),
        );
        Self {
            router: QueryStrategyRouter::new(),
            vector: VectorRetriever::new(vector_store, embedder),
            graph: GraphRetriever::new(graph_store),
            fusion: FusionRanker::new(config.retrieval.vector_weight, config.retrieval.graph_weight),
            analytics,
            config,
        }
    }

    /// Route and execute one search.
    pub async fn search(&self, request: SearchRequest) -> Vec<SearchResult> {
        let strategy = self.router.classify(&request.query, &request.context);
        self.search_with_strategy(request, strategy).await
    }

    /// Execute one search under a caller-chosen strategy.
    pub async fn search_with_strategy(
        &self,
        request: SearchRequest,
        strategy: QueryStrategy,
    ) -> Vec<SearchResult> {
        if is_greeting(&request.query) {
            debug!(query = %request.query, "greeting short-circuit");
            return Vec::new();
        }

        let started = Instant::now();
        let (results, failure) = match self.dispatch(strategy, &request).await {
            Ok(outcome) => outcome,
            Err(reason) => {
                // last resort: one vector-only retry before giving up
                warn!(%strategy, reason, "strategy dispatch failed, retrying vector-only");
                let retry = self.run_vector(&request).await;
                (retry.results, Some(reason))
            }
        };

        let telemetry = SearchTelemetry::new(
            request.query.clone(),
            strategy,
            results.len(),
            started.elapsed(),
            failure,
        );
        if let Err(e) = self.analytics.record(telemetry).await {
            warn!(error = %e, "analytics sink rejected telemetry");
        }

        results
    }

    pub async fn cache_stats(&self) -> acre_embeddings::CacheStats {
        self.vector.embedder().cache_stats().await
    }

    /// Run the strategy's retriever(s). `Err` here means the dispatch path
    /// itself failed and the engine should fall back to vector-only.
    async fn dispatch(
        &self,
        strategy: QueryStrategy,
        request: &SearchRequest,
    ) -> Result<(Vec<SearchResult>, Option<String>), String> {
        match strategy {
            QueryStrategy::VectorOnly => {
                let outcome = self.run_vector(request).await;
                match outcome.failure {
                    Some(reason) => Err(reason),
                    None => Ok((outcome.results, None)),
                }
            }
            QueryStrategy::External => {
                // external sources are not served by this engine
                info!("external strategy requested, serving vector retrieval");
                let outcome = self.run_vector(request).await;
                Ok((outcome.results, outcome.failure))
            }
            QueryStrategy::GraphOnly => {
                let outcome = self.run_graph(request).await;
                Ok((outcome.results, outcome.failure))
            }
            QueryStrategy::Hybrid => {
                let (vector, graph) =
                    tokio::join!(self.run_vector(request), self.run_graph(request));
                let failure = match (vector.failure, graph.failure) {
                    (Some(v), Some(g)) => Some(format!("vector: {v}; graph: {g}")),
                    (Some(v), None) => Some(format!("vector: {v}")),
                    (None, Some(g)) => Some(format!("graph: {g}")),
                    (None, None) => None,
                };
                let fused = self
                    .fusion
                    .fuse(vector.results, graph.results, request.limit);
                Ok((fused, failure))
            }
        }
    }

    async fn run_vector(&self, request: &SearchRequest) -> ChannelOutcome {
        let deadline = self.retriever_deadline();
        match timeout(
            deadline,
            self.vector.search(
                &request.query,
                request.limit,
                &request.filters,
                request.similarity_threshold,
            ),
        )
        .await
        {
            Ok(Ok(results)) => ChannelOutcome::ok(results),
            Ok(Err(e)) => {
                warn!(error = %e, "vector retrieval failed");
                ChannelOutcome::failed(e.to_string())
            }
            Err(_) => {
                warn!(?deadline, "vector retrieval timed out");
                ChannelOutcome::failed("vector retrieval timed out".to_string())
            }
        }
    }

    async fn run_graph(&self, request: &SearchRequest) -> ChannelOutcome {
        let deadline = self.retriever_deadline();
        // the configured depth is a ceiling on whatever the request asks for
        let depth = request.max_depth.min(self.config.retrieval.max_depth);
        let search = self
            .graph
            .search(&request.query, request.limit, &request.filters, depth);
        match timeout(deadline, search).await {
            Ok(Ok(results)) => ChannelOutcome::ok(results),
            Ok(Err(e)) => {
                warn!(error = %e, "graph retrieval failed");
                ChannelOutcome::failed(e.to_string())
            }
            Err(_) => {
                warn!(?deadline, "graph retrieval timed out");
                ChannelOutcome::failed("graph retrieval timed out".to_string())
            }
        }
    }

    fn retriever_deadline(&self) -> Duration {
        Duration::from_secs(self.config.retrieval.retriever_timeout_secs)
    }
}

/// Greeting utterances bypass retrieval entirely.
fn is_greeting(query: &str) -> bool {
    let normalized = query.trim().to_lowercase();
    GREETINGS.contains(&normalized.as_str())
}
