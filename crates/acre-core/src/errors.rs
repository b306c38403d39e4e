//! Retrieval subsystem errors.
//!
//! Every retriever-level failure is caught at the narrowest possible scope
//! and converted to an empty result; these variants exist so call sites and
//! telemetry can still tell failure modes apart.

/// Errors raised inside the retrieval engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("{store} store unreachable: {message}")]
    Connectivity { store: String, message: String },

    #[error("embedding provider {provider} failed: {reason}")]
    EmbeddingProvider { provider: String, reason: String },

    #[error("query execution failed: {reason}")]
    QueryExecution { reason: String },

    #[error("cache I/O failed for {path}: {message}")]
    CacheIo { path: String, message: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

/// Result alias used throughout the workspace.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

impl RetrievalError {
    /// Connectivity error for the named store.
    pub fn connectivity(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connectivity {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Provider failure with a reason.
    pub fn provider(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EmbeddingProvider {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Malformed traversal or predicate.
    pub fn query(reason: impl Into<String>) -> Self {
        Self::QueryExecution {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = RetrievalError::connectivity("vector", "connection refused");
        assert_eq!(err.to_string(), "vector store unreachable: connection refused");

        let err = RetrievalError::provider("openai", "429 rate limited");
        assert!(err.to_string().contains("openai"));

        let err = RetrievalError::CacheIo {
            path: "/tmp/cache".into(),
            message: "permission denied".into(),
        };
        assert!(err.to_string().contains("/tmp/cache"));
    }
}
