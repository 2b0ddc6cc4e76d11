// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache-aside reads for upstream values.
//!
//! Backends implement [`ValueCache`], a string key/value store with per-entry
//! expiry:
//!
//! - [`RedisCache`]: shared across processes (production)
//! - [`MemoryCache`]: in-process with optional size limit
//! - [`NoOpCache`]: disables caching entirely
//!
//! [`get_or_set_cache`] layers the read-through logic on top: return the
//! cached value if there is one, otherwise run the producer, store its result
//! with the given TTL and return it.
//!
//! # Failure policy
//!
//! The cache is advisory. Backend errors, decode failures and cache calls cut
//! off by the deadline are logged and treated as misses; they never fail the
//! caller. Only the producer's own error propagates.
//!
//! There is no stampede protection: concurrent misses on one key each run the
//! producer, and the last write wins. Producers must be side-effect free.
//!
//! # Example
//!
//! ```rust,ignore
//! use ethinfo::cache::{get_or_set_cache, MemoryCache};
//! use ethinfo::config::constants::{BLOCK_NUMBER_KEY, CACHE_TTL};
//!
//! let cache = MemoryCache::new();
//! let height: u64 = get_or_set_cache(&cache, BLOCK_NUMBER_KEY, CACHE_TTL, &deadline, || {
//!     reader.block_number(&deadline)
//! })
//! .await?;
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn, Instrument, Span};

use crate::deadline::Deadline;
use crate::errors::CacheError;
use crate::spans;

mod memory;
mod noop;
mod redis_cache;

pub use memory::MemoryCache;
pub use noop::NoOpCache;
pub use redis_cache::RedisCache;

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key absent or expired)
    pub misses: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Number of entries expired due to TTL
    pub expirations: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, expirations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.expirations,
            self.entries,
            self.hit_rate()
        )
    }
}

/// String key/value store with per-entry expiry.
///
/// Values are opaque strings; [`get_or_set_cache`] stores JSON in them.
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait ValueCache: Send + Sync {
    /// Fetch the value under `key`, `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value, expiring after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Counters kept by the backend, `None` when it keeps none.
    async fn stats(&self) -> Option<CacheStats> {
        None
    }
}

/// Return the cached value under `key`, or produce, cache and return a fresh one.
///
/// On a hit the producer is not called. On a miss the producer runs once and
/// its result is stored as JSON with expiry `ttl`. Cache trouble of any kind
/// degrades to a miss (see the module docs); producer errors are returned
/// unchanged and nothing is cached for them.
pub async fn get_or_set_cache<T, E, F, Fut>(
    cache: &dyn ValueCache,
    key: &str,
    ttl: Duration,
    deadline: &Deadline,
    producer: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    async move {
        if let Some(cached) = read_cached::<T>(cache, key, deadline).await {
            Span::current().record("hit", true);
            return Ok(cached);
        }
        Span::current().record("hit", false);

        let fresh = producer().await?;
        if let Err(error) = write_cached(cache, key, &fresh, ttl, deadline).await {
            warn!(key, backend = cache.name(), error = %error, "Cache write failed, value not cached");
        }
        Ok::<T, E>(fresh)
    }
    .instrument(spans::cache_aside(key, cache.name()))
    .await
}

async fn read_cached<T: DeserializeOwned>(
    cache: &dyn ValueCache,
    key: &str,
    deadline: &Deadline,
) -> Option<T> {
    let raw = match deadline.run("cache.get", cache.get(key)).await {
        Ok(Ok(Some(raw))) => raw,
        Ok(Ok(None)) => {
            debug!(key, "Cache miss");
            return None;
        }
        Ok(Err(error)) => {
            warn!(key, backend = cache.name(), error = %error, "Cache read failed, bypassing cache");
            return None;
        }
        Err(error) => {
            warn!(key, backend = cache.name(), error = %error, "Cache read abandoned, bypassing cache");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(key, "Cache hit");
            Some(value)
        }
        Err(error) => {
            warn!(key, error = %error, "Discarding undecodable cache entry");
            None
        }
    }
}

async fn write_cached<T: Serialize>(
    cache: &dyn ValueCache,
    key: &str,
    value: &T,
    ttl: Duration,
    deadline: &Deadline,
) -> Result<(), CacheError> {
    let encoded = serde_json::to_string(value).map_err(|source| CacheError::Encode {
        key: key.to_string(),
        source,
    })?;
    deadline.run("cache.set", cache.set(key, encoded, ttl)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend whose every call fails.
    struct BrokenCache;

    #[async_trait]
    impl ValueCache for BrokenCache {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::backend(
                "broken",
                "get",
                std::io::Error::other("connection refused"),
            ))
        }

        async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
            Err(CacheError::backend(
                "broken",
                "set",
                std::io::Error::other("connection refused"),
            ))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = MemoryCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        for _ in 0..3 {
            let value: Result<u64, ()> = get_or_set_cache(&cache, "blockNumber", ttl, &deadline(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(19_000_000)
            })
            .await;
            assert_eq!(value, Ok(19_000_000));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.get("blockNumber").await.unwrap().as_deref(),
            Some("19000000")
        );
    }

    #[tokio::test]
    async fn test_producer_error_is_not_cached() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);

        let first: Result<u64, &str> =
            get_or_set_cache(&cache, "k", ttl, &deadline(), || async { Err("node down") }).await;
        assert_eq!(first, Err("node down"));
        assert_eq!(cache.get("k").await.unwrap(), None);

        let second: Result<u64, &str> =
            get_or_set_cache(&cache, "k", ttl, &deadline(), || async { Ok(5) }).await;
        assert_eq!(second, Ok(5));
    }

    #[tokio::test]
    async fn test_broken_backend_is_bypassed() {
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            let value: Result<u64, ()> =
                get_or_set_cache(&BrokenCache, "k", Duration::from_secs(60), &deadline(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(1)
                })
                .await;
            assert_eq!(value, Ok(1));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_treated_as_miss() {
        let cache = MemoryCache::new();
        cache
            .set("k", "not json".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        let value: Result<u64, ()> =
            get_or_set_cache(&cache, "k", Duration::from_secs(60), &deadline(), || async { Ok(9) }).await;
        assert_eq!(value, Ok(9));
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn test_noop_cache_always_produces() {
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            let _: Result<u64, ()> =
                get_or_set_cache(&NoOpCache, "k", Duration::from_secs(60), &deadline(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(1)
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 75.0).abs() < f64::EPSILON);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
