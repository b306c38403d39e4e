//! Embedding cache with lazy TTL expiry and per-model disk partitions.
//!
//! Keys are a content hash of model name and trimmed text, so the same
//! text cached under two models never collides. Entries carry the full
//! provider output, vector and token count, so a hit reproduces exactly
//! what the provider returned. Expired entries are dropped on lookup, not
//! by a background sweeper. At capacity the oldest fifth of entries is
//! evicted in one pass.
//!
//! Persistence is best-effort: partitions are snapshotted under the lock
//! and written on a blocking task outside it, and any disk failure
//! downgrades the cache to memory-only with a warning. It never fails a
//! caller.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use acre_core::config::CacheConfig;
use acre_core::constants::CACHE_EVICTION_FRACTION;
use acre_core::models::Embedding;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    model: String,
    vector: Vec<f32>,
    token_count: usize,
    /// Epoch seconds at insertion.
    cached_at: i64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
    dirty_models: HashSet<String>,
    last_persist: Option<Instant>,
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Shared embedding cache.
pub struct EmbeddingCache {
    config: CacheConfig,
    inner: Mutex<CacheInner>,
}

impl EmbeddingCache {
    /// Build a cache, loading any persisted partitions found in the
    /// configured directory. Entries that expired while on disk are
    /// discarded during load.
    pub fn new(config: CacheConfig) -> Self {
        let mut inner = CacheInner::default();
        if config.enabled {
            if let Some(dir) = &config.persist_dir {
                load_partitions(dir, config.ttl_secs, &mut inner.entries);
            }
        }
        Self {
            config,
            inner: Mutex::new(inner),
        }
    }

    fn key(model: &str, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(model.as_bytes());
        hasher.update(b"\n");
        hasher.update(text.trim().as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    fn is_expired(&self, entry: &CacheEntry, now: i64) -> bool {
        now - entry.cached_at >= self.config.ttl_secs as i64
    }

    /// Look up a cached embedding, purging it if its TTL has lapsed.
    pub async fn get(&self, model: &str, text: &str) -> Option<Embedding> {
        if !self.config.enabled {
            return None;
        }
        let key = Self::key(model, text);
        let now = Utc::now().timestamp();
        let mut inner = self.inner.lock().await;

        match inner.entries.get(&key) {
            Some(entry) if self.is_expired(entry, now) => {
                inner.entries.remove(&key);
                inner.dirty_models.insert(model.to_string());
                inner.misses += 1;
                None
            }
            Some(entry) => {
                let embedding = Embedding::new(entry.vector.clone(), entry.token_count);
                inner.hits += 1;
                Some(embedding)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert an embedding, evicting the oldest entries when at capacity
    /// and flushing dirty partitions if the persist interval has elapsed.
    pub async fn set(&self, model: &str, text: &str, embedding: Embedding) {
        if !self.config.enabled {
            return;
        }
        let key = Self::key(model, text);
        let mut inner = self.inner.lock().await;

        if inner.entries.len() >= self.config.max_entries && !inner.entries.contains_key(&key) {
            self.evict_oldest(&mut inner);
        }

        inner.entries.insert(
            key,
            CacheEntry {
                model: model.to_string(),
                vector: embedding.vector,
                token_count: embedding.token_count,
                cached_at: Utc::now().timestamp(),
            },
        );
        inner.dirty_models.insert(model.to_string());

        let due = inner
            .last_persist
            .map(|t| t.elapsed().as_secs() >= self.config.persist_interval_secs)
            .unwrap_or(true);
        let partitions = if due {
            self.snapshot_dirty(&mut inner)
        } else {
            Vec::new()
        };
        drop(inner);
        self.write_partitions(partitions).await;
    }

    /// Force all dirty partitions to disk.
    pub async fn flush(&self) {
        let mut inner = self.inner.lock().await;
        let partitions = self.snapshot_dirty(&mut inner);
        drop(inner);
        self.write_partitions(partitions).await;
    }

    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().await;
        let total = inner.hits + inner.misses;
        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                inner.hits as f64 / total as f64
            },
        }
    }

    fn evict_oldest(&self, inner: &mut CacheInner) {
        let count = ((inner.entries.len() as f64 * CACHE_EVICTION_FRACTION) as usize).max(1);
        let mut by_age: Vec<(String, i64, String)> = inner
            .entries
            .iter()
            .map(|(k, e)| (k.clone(), e.cached_at, e.model.clone()))
            .collect();
        by_age.sort_by_key(|(_, cached_at, _)| *cached_at);
        for (key, _, model) in by_age.into_iter().take(count) {
            inner.entries.remove(&key);
            inner.dirty_models.insert(model);
        }
        debug!(evicted = count, "cache at capacity, evicted oldest entries");
    }

    /// Serialize dirty partitions under the lock; the actual disk writes
    /// happen outside it.
    fn snapshot_dirty(&self, inner: &mut CacheInner) -> Vec<(PathBuf, Vec<u8>)> {
        let Some(dir) = &self.config.persist_dir else {
            inner.dirty_models.clear();
            return Vec::new();
        };
        if inner.dirty_models.is_empty() {
            return Vec::new();
        }
        let mut partitions = Vec::new();
        for model in std::mem::take(&mut inner.dirty_models) {
            let partition: HashMap<&String, &CacheEntry> = inner
                .entries
                .iter()
                .filter(|(_, e)| e.model == model)
                .collect();
            match serde_json::to_vec(&partition) {
                Ok(payload) => partitions.push((partition_path(dir, &model), payload)),
                Err(e) => warn!(model = %model, error = %e, "failed to serialize cache partition"),
            }
        }
        inner.last_persist = Some(Instant::now());
        partitions
    }

    async fn write_partitions(&self, partitions: Vec<(PathBuf, Vec<u8>)>) {
        if partitions.is_empty() {
            return;
        }
        let Some(dir) = self.config.persist_dir.clone() else {
            return;
        };
        let task = tokio::task::spawn_blocking(move || {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                warn!(dir = %dir.display(), error = %e, "cache persistence unavailable, staying memory-only");
                return;
            }
            for (path, payload) in partitions {
                if let Err(e) = std::fs::write(&path, payload) {
                    warn!(path = %path.display(), error = %e, "failed to write cache partition");
                }
            }
        });
        if let Err(e) = task.await {
            warn!(error = %e, "cache persistence task failed");
        }
    }
}

fn partition_path(dir: &PathBuf, model: &str) -> PathBuf {
    let safe: String = model
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    dir.join(format!("{safe}_cache.json"))
}

fn load_partitions(dir: &PathBuf, ttl_secs: u64, entries: &mut HashMap<String, CacheEntry>) {
    let listing = match std::fs::read_dir(dir) {
        Ok(l) => l,
        Err(_) => return, // no directory yet, nothing persisted
    };
    let now = Utc::now().timestamp();
    for item in listing.flatten() {
        let path = item.path();
        let is_partition = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with("_cache.json"));
        if !is_partition {
            continue;
        }
        let raw = match std::fs::read(&path) {
            Ok(r) => r,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable cache partition");
                continue;
            }
        };
        match serde_json::from_slice::<HashMap<String, CacheEntry>>(&raw) {
            Ok(partition) => {
                let loaded = partition.len();
                entries.extend(
                    partition
                        .into_iter()
                        .filter(|(_, e)| now - e.cached_at < ttl_secs as i64),
                );
                debug!(path = %path.display(), loaded, "loaded cache partition");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping corrupt cache partition");
            }
        }
    }
}
