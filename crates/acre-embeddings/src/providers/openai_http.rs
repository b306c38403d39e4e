//! Provider backed by an OpenAI-compatible `/embeddings` endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use acre_core::errors::{RetrievalError, RetrievalResult};
use acre_core::models::Embedding;
use acre_core::traits::IEmbeddingProvider;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    total_tokens: usize,
}

/// HTTP embedding provider speaking the OpenAI embeddings wire format.
pub struct OpenAiHttpProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiHttpProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            dimensions,
        }
    }

    async fn request(&self, input: &[String]) -> RetrievalResult<EmbeddingResponse> {
        let url = format!("{}/embeddings", self.base_url);
        let body = EmbeddingRequest {
            model: &self.model,
            input,
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::provider(&self.model, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RetrievalError::provider(
                &self.model,
                format!("HTTP {status}: {detail}"),
            ));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::provider(&self.model, e.to_string()))?;
        debug!(
            model = %self.model,
            inputs = input.len(),
            tokens = parsed.usage.total_tokens,
            "embedding request complete"
        );
        Ok(parsed)
    }
}

impl IEmbeddingProvider for OpenAiHttpProvider {
    async fn embed(&self, text: &str) -> RetrievalResult<Embedding> {
        let input = vec![text.to_string()];
        let response = self.request(&input).await?;
        let datum = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::provider(&self.model, "empty response"))?;
        Ok(Embedding::new(datum.embedding, response.usage.total_tokens))
    }

    async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Option<Embedding>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let response = self.request(texts).await?;
        let tokens_each = response.usage.total_tokens / texts.len().max(1);

        // the API may skip inputs it rejects, so place each datum by index
        let mut slots: Vec<Option<Embedding>> = vec![None; texts.len()];
        for datum in response.data {
            if let Some(slot) = slots.get_mut(datum.index) {
                *slot = Some(Embedding::new(datum.embedding, tokens_each));
            }
        }
        Ok(slots)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}
