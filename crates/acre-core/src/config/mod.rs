//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document yields a working
//! configuration; files override only what they name.

mod cache_config;
mod embedding_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RetrievalError, RetrievalResult};

pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use retrieval_config::RetrievalConfig;

/// Top-level configuration for the retrieval engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
    pub embedding: EmbeddingConfig,
}

impl EngineConfig {
    /// Parse a TOML document, falling back to defaults for absent fields.
    pub fn from_toml_str(raw: &str) -> RetrievalResult<Self> {
        let config: EngineConfig = toml::from_str(raw).map_err(|e| RetrievalError::Validation {
            field: "config".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> RetrievalResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| RetrievalError::CacheIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> RetrievalResult<()> {
        self.retrieval.validate()?;
        self.cache.validate()?;
        self.embedding.validate()
    }
}
