use crate::errors::RetrievalResult;
use crate::models::SearchTelemetry;

/// Sink for per-search telemetry. Recording is best-effort: the engine
/// logs and discards sink errors rather than failing the search.
pub trait IAnalyticsSink: Send + Sync {
    async fn record(&self, telemetry: SearchTelemetry) -> RetrievalResult<()>;
}

impl<S: IAnalyticsSink> IAnalyticsSink for std::sync::Arc<S> {
    async fn record(&self, telemetry: SearchTelemetry) -> RetrievalResult<()> {
        (**self).record(telemetry).await
    }
}
