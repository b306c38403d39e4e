use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{RetrievalError, RetrievalResult};

/// Embedding cache sizing, expiry, and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Entry lifetime; expired entries are dropped lazily on lookup.
    pub ttl_secs: u64,
    /// Hard cap on resident entries; insertion at the cap evicts the
    /// oldest fraction in bulk.
    pub max_entries: usize,
    /// Directory for per-model cache partitions. `None` keeps the cache
    /// memory-only.
    pub persist_dir: Option<PathBuf>,
    /// Minimum seconds between persistence flushes of a dirty partition.
    pub persist_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: constants::DEFAULT_CACHE_TTL_SECS,
            max_entries: constants::DEFAULT_CACHE_MAX_ENTRIES,
            persist_dir: None,
            persist_interval_secs: constants::DEFAULT_CACHE_PERSIST_INTERVAL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> RetrievalResult<()> {
        if self.enabled && self.max_entries == 0 {
            return Err(RetrievalError::Validation {
                field: "cache.max_entries".to_string(),
                reason: "must be at least 1 when the cache is enabled".to_string(),
            });
        }
        Ok(())
    }
}
