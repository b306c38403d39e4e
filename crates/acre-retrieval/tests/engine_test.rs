//! End-to-end engine behavior over the in-memory fixture corpus.

use std::sync::Arc;
use std::time::Duration;

use acre_core::config::EngineConfig;
use acre_core::errors::RetrievalResult;
use acre_core::graph::{AgentListings, GraphNode, LocationMarket, PropertyMatch};
use acre_core::models::{QueryStrategy, SearchRequest};
use acre_core::traits::IGraphStore;
use acre_observability::SearchAnalytics;
use acre_retrieval::RetrievalEngine;
use test_fixtures::{
    sample_corpus, CountingProvider, FailingGraphStore, FailingProvider, FailingSink,
    FailingVectorStore, InMemoryGraphStore, InMemoryVectorStore, KeywordEmbeddingProvider,
};

fn test_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.embedding.dimensions = 4;
    config.embedding.min_call_interval_ms = 0;
    config
}

fn request(query: &str) -> SearchRequest {
    let mut request = SearchRequest::new(query);
    request.similarity_threshold = 0.3;
    request
}

#[tokio::test]
async fn hybrid_ranks_cross_source_agreement_first() {
    let corpus = sample_corpus();
    let analytics = Arc::new(SearchAnalytics::new());
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        KeywordEmbeddingProvider::new(),
        Arc::clone(&analytics),
        test_config(),
    );

    let results = engine.search(request("3 bedroom house in Austin, TX")).await;

    assert!(!results.is_empty());
    // md_austin is the only id known to both stores; the confirmation
    // boost must put it above the perfect-similarity vector-only hits
    assert_eq!(results[0].result_id, "md_austin");
    assert_eq!(
        results.iter().filter(|r| r.result_id == "md_austin").count(),
        1
    );
    let scores: Vec<f64> = results.iter().filter_map(|r| r.relevance_score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    let recent = analytics.recent(1).await;
    assert_eq!(recent[0].strategy, QueryStrategy::Hybrid);
    assert!(recent[0].has_results);
    assert!(recent[0].failure.is_none());
}

#[tokio::test]
async fn greetings_short_circuit_without_any_io() {
    let store = Arc::new(InMemoryVectorStore::new());
    let provider = Arc::new(CountingProvider::new(KeywordEmbeddingProvider::new()));
    let analytics = Arc::new(SearchAnalytics::new());
    let engine = RetrievalEngine::new(
        Arc::clone(&store),
        InMemoryGraphStore::new(),
        Arc::clone(&provider),
        Arc::clone(&analytics),
        test_config(),
    );

    for greeting in ["hi", "  Hello Agent  ", "HEY", "hello"] {
        assert!(engine.search(request(greeting)).await.is_empty());
    }

    assert_eq!(store.call_count(), 0);
    assert_eq!(provider.call_count(), 0);
    assert!(analytics.is_empty().await);
}

#[tokio::test]
async fn empty_stores_yield_empty_list_and_telemetry() {
    let analytics = Arc::new(SearchAnalytics::new());
    let engine = RetrievalEngine::new(
        InMemoryVectorStore::new(),
        InMemoryGraphStore::new(),
        KeywordEmbeddingProvider::new(),
        Arc::clone(&analytics),
        test_config(),
    );

    let results = engine.search(request("what a lovely day outside")).await;
    assert!(results.is_empty());

    let recent = analytics.recent(1).await;
    assert!(!recent[0].has_results);
    assert_eq!(recent[0].result_count, 0);
}

#[tokio::test]
async fn provider_outage_still_serves_graph_results() {
    let corpus = sample_corpus();
    let analytics = Arc::new(SearchAnalytics::new());
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        FailingProvider,
        Arc::clone(&analytics),
        test_config(),
    );

    let results = engine.search(request("3 bedroom house in Austin, TX")).await;

    // vector channel died with the provider; graph carries the search
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result_id, "md_austin");
    // empty vector side collapses all fusion weight onto the graph
    assert_eq!(results[0].relevance_score, Some(0.9));

    let recent = analytics.recent(1).await;
    assert!(recent[0].failure.as_deref().unwrap().contains("vector"));
    assert!(recent[0].has_results);
}

#[tokio::test]
async fn graph_outage_leaves_vector_results_and_marks_telemetry() {
    let corpus = sample_corpus();
    let analytics = Arc::new(SearchAnalytics::new());
    let engine = RetrievalEngine::new(
        corpus.vector,
        FailingGraphStore,
        KeywordEmbeddingProvider::new(),
        Arc::clone(&analytics),
        test_config(),
    );

    let results = engine.search(request("3 bedroom house in Austin, TX")).await;

    // the graph channel is down; everything served is vector-sourced
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.similarity_score.is_some()));

    let recent = analytics.recent(1).await;
    assert!(recent[0].failure.as_deref().unwrap().contains("graph"));
    assert!(recent[0].has_results);
}

#[tokio::test]
async fn shallow_max_depth_skips_joined_market_data() {
    let corpus = sample_corpus();
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        KeywordEmbeddingProvider::new(),
        SearchAnalytics::new(),
        test_config(),
    );

    let deep = engine
        .search_with_strategy(request("homes in Austin, TX"), QueryStrategy::GraphOnly)
        .await;
    assert_eq!(deep[0].result_id, "md_austin");
    assert_eq!(deep[0].relevance_score, Some(0.9));

    let mut shallow_request = request("homes in Austin, TX");
    shallow_request.max_depth = 1;
    let shallow = engine
        .search_with_strategy(shallow_request, QueryStrategy::GraphOnly)
        .await;
    // depth 1 keeps the location node itself but never follows the
    // market data join, so the bare-location score applies
    assert_eq!(shallow[0].result_id, "loc_austin");
    assert_eq!(shallow[0].relevance_score, Some(0.7));
    assert_eq!(shallow[0].title, "Austin, TX Market Data");
}

#[tokio::test]
async fn total_vector_outage_degrades_to_empty() {
    let analytics = Arc::new(SearchAnalytics::new());
    let engine = RetrievalEngine::new(
        FailingVectorStore,
        InMemoryGraphStore::new(),
        KeywordEmbeddingProvider::new(),
        Arc::clone(&analytics),
        test_config(),
    );

    let results = engine
        .search_with_strategy(
            request("compare market prices"),
            QueryStrategy::VectorOnly,
        )
        .await;
    assert!(results.is_empty());

    let recent = analytics.recent(1).await;
    assert!(recent[0].failure.is_some());
}

#[tokio::test]
async fn sink_failure_never_affects_results() {
    let corpus = sample_corpus();
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        KeywordEmbeddingProvider::new(),
        FailingSink,
        test_config(),
    );

    let results = engine.search(request("3 bedroom house in Austin, TX")).await;
    assert!(!results.is_empty());
}

#[tokio::test]
async fn graph_only_agent_lookup() {
    let corpus = sample_corpus();
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        KeywordEmbeddingProvider::new(),
        SearchAnalytics::new(),
        test_config(),
    );

    let results = engine
        .search_with_strategy(request("agent Jane Rivera listings"), QueryStrategy::GraphOnly)
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result_id, "agent_jane");
    assert_eq!(results[0].title, "Jane Rivera - Real Estate Agent");
    assert!(results[0].content.contains("Active listings: 1."));
    assert_eq!(results[0].relevance_score, Some(0.9));
}

#[tokio::test]
async fn metric_and_location_sub_query_returns_newest_first() {
    let corpus = sample_corpus();
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        KeywordEmbeddingProvider::new(),
        SearchAnalytics::new(),
        test_config(),
    );

    let results = engine
        .search_with_strategy(
            request("What is the median price in Austin, TX?"),
            QueryStrategy::GraphOnly,
        )
        .await;

    // location snapshot first, then metric matches newest first
    assert_eq!(results[0].result_id, "md_austin");
    assert_eq!(results[0].relevance_score, Some(0.9));
    let metric_hits: Vec<&str> = results[1..]
        .iter()
        .map(|r| r.result_id.as_str())
        .collect();
    assert_eq!(metric_hits, vec!["md_austin", "md_austin_old"]);
}

#[tokio::test]
async fn external_strategy_serves_vector_retrieval() {
    let corpus = sample_corpus();
    let analytics = Arc::new(SearchAnalytics::new());
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        KeywordEmbeddingProvider::new(),
        Arc::clone(&analytics),
        test_config(),
    );

    let results = engine
        .search_with_strategy(request("3 bedroom house in Austin, TX"), QueryStrategy::External)
        .await;
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.similarity_score.is_some()));

    let recent = analytics.recent(1).await;
    assert_eq!(recent[0].strategy, QueryStrategy::External);
}

#[tokio::test]
async fn repeated_query_reuses_cached_embedding() {
    let corpus = sample_corpus();
    let provider = Arc::new(CountingProvider::new(KeywordEmbeddingProvider::new()));
    let engine = RetrievalEngine::new(
        corpus.vector,
        corpus.graph,
        Arc::clone(&provider),
        SearchAnalytics::new(),
        test_config(),
    );

    engine.search(request("3 bedroom house in Austin, TX")).await;
    engine.search(request("3 bedroom house in Austin, TX")).await;

    assert_eq!(provider.call_count(), 1);
    let stats = engine.cache_stats().await;
    assert!(stats.hits >= 1);
}

/// Graph store that hangs long enough to trip the per-retriever deadline.
struct SlowGraphStore;

impl IGraphStore for SlowGraphStore {
    async fn market_snapshot(
        &self,
        _city: &str,
        _state: Option<&str>,
        _limit: usize,
    ) -> RetrievalResult<Vec<LocationMarket>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }

    async fn find_property(&self, _reference: &str) -> RetrievalResult<Option<PropertyMatch>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }

    async fn agents_named(&self, _name: &str, _limit: usize) -> RetrievalResult<Vec<AgentListings>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }

    async fn market_data_mentioning(
        &self,
        _metrics: &[String],
        _locations: &[String],
        _limit: usize,
    ) -> RetrievalResult<Vec<GraphNode>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }

    async fn scan_content(&self, _text: &str, _limit: usize) -> RetrievalResult<Vec<GraphNode>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_graph_retriever_times_out_and_vector_carries_on() {
    let corpus = sample_corpus();
    let analytics = Arc::new(SearchAnalytics::new());
    let mut config = test_config();
    config.retrieval.retriever_timeout_secs = 1;
    let engine = RetrievalEngine::new(
        corpus.vector,
        SlowGraphStore,
        KeywordEmbeddingProvider::new(),
        Arc::clone(&analytics),
        config,
    );

    let results = engine.search(request("3 bedroom house in Austin, TX")).await;

    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.similarity_score.is_some()));

    let recent = analytics.recent(1).await;
    assert!(recent[0].failure.as_deref().unwrap().contains("graph"));
}
