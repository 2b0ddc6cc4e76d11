// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache implementation with per-entry TTL and optional size limit

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::{CacheStats, ValueCache};
use crate::errors::CacheError;

/// Entry in the memory cache with metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
    /// Sequence number of the last access, for LRU eviction
    access_seq: u64,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct MemoryCacheState {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
    next_seq: u64,
}

impl MemoryCacheState {
    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

/// In-process [`ValueCache`] backed by a `HashMap`.
///
/// Expiry uses tokio's clock, so tests running with a paused clock can
/// advance past a TTL without sleeping. Expired entries are dropped lazily
/// on access. With [`with_max_entries`](Self::with_max_entries) set, inserting
/// into a full cache evicts the least recently used entry.
///
/// Suitable for single-instance deployments and tests; use
/// [`RedisCache`](super::RedisCache) when several instances should share hits.
///
/// ```rust,ignore
/// use ethinfo::cache::MemoryCache;
///
/// let cache = MemoryCache::new().with_max_entries(1024);
/// ```
#[derive(Debug, Default)]
pub struct MemoryCache {
    max_entries: Option<usize>,
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    /// Creates a new memory cache with no size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of entries in the cache
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    /// Snapshot of hit/miss counters
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            entries: state.entries.len(),
            ..state.stats.clone()
        }
    }

    fn evict_lru(state: &mut MemoryCacheState) {
        let lru_key = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_seq)
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            debug!(key = %key, "Evicting LRU cache entry");
            state.entries.remove(&key);
            state.stats.evictions += 1;
        }
    }
}

#[async_trait]
impl ValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        let seq = state.bump_seq();

        let value = match state.entries.get_mut(key) {
            Some(entry) if entry.is_expired(now) => {
                debug!(key, "Cache entry expired");
                state.entries.remove(key);
                state.stats.expirations += 1;
                None
            }
            Some(entry) => {
                entry.access_seq = seq;
                Some(entry.value.clone())
            }
            None => None,
        };

        if value.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        state.stats.entries = state.entries.len();

        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;

        if let Some(max_entries) = self.max_entries {
            if !state.entries.contains_key(key) {
                while state.entries.len() >= max_entries {
                    Self::evict_lru(&mut state);
                }
            }
        }

        let access_seq = state.bump_seq();
        state.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
                access_seq,
            },
        );
        state.stats.entries = state.entries.len();

        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }

    async fn stats(&self) -> Option<CacheStats> {
        Some(MemoryCache::stats(self).await)
    }
}
