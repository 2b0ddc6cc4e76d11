// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the cache-aside helper against the public cache backends

mod helpers;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ethinfo::config::constants::{CACHE_TTL, FEE_DATA_KEY};
use ethinfo::{get_or_set_cache, CacheError, Deadline, FeeData, MemoryCache, ValueCache, WeiAmount};
use helpers::{CountingCache, FailingCache};

/// Cache whose calls never complete
struct HangingCache;

#[async_trait]
impl ValueCache for HangingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        std::future::pending().await
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        std::future::pending().await
    }

    fn name(&self) -> &'static str {
        "hanging"
    }
}

fn sample_fees() -> FeeData {
    FeeData::from_parts(WeiAmount::from(30_000_000_000u64), Some(12_000_000_000))
}

#[tokio::test]
async fn test_fee_data_survives_the_cache_round_trip() {
    let cache = CountingCache::new();
    let deadline = Deadline::after(Duration::from_secs(5));

    let produced: Result<FeeData, ()> =
        get_or_set_cache(&cache, FEE_DATA_KEY, CACHE_TTL, &deadline, || async { Ok(sample_fees()) }).await;
    let cached: Result<FeeData, ()> =
        get_or_set_cache(&cache, FEE_DATA_KEY, CACHE_TTL, &deadline, || async {
            panic!("producer must not run on a hit")
        })
        .await;

    assert_eq!(produced, Ok(sample_fees()));
    assert_eq!(cached, Ok(sample_fees()));
    assert_eq!(cache.gets(), 2);
    assert_eq!(cache.sets(), 1);
}

async fn fetch_block(cache: &MemoryCache, produced: &AtomicUsize) -> Result<u64, ()> {
    let deadline = Deadline::after(Duration::from_secs(5));
    get_or_set_cache(cache, "blockNumber", CACHE_TTL, &deadline, || async {
        Ok(produced.fetch_add(1, Ordering::SeqCst) as u64)
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn test_entry_is_refreshed_after_ttl() {
    let cache = MemoryCache::new();
    let produced = AtomicUsize::new(0);

    assert_eq!(fetch_block(&cache, &produced).await, Ok(0));
    tokio::time::advance(Duration::from_secs(30)).await;
    assert_eq!(fetch_block(&cache, &produced).await, Ok(0));
    tokio::time::advance(Duration::from_secs(31)).await;
    assert_eq!(fetch_block(&cache, &produced).await, Ok(1));

    assert_eq!(produced.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failing_backend_falls_through_to_producer() {
    let cache = FailingCache::default();
    let deadline = Deadline::after(Duration::from_secs(5));

    let value: Result<u64, ()> =
        get_or_set_cache(&cache, "blockNumber", CACHE_TTL, &deadline, || async { Ok(42) }).await;

    assert_eq!(value, Ok(42));
    assert_eq!(cache.calls(), 2, "one read and one write attempt");
}

#[tokio::test(start_paused = true)]
async fn test_hanging_backend_is_abandoned_at_the_deadline() {
    let deadline = Deadline::after(Duration::from_millis(200));

    let value: Result<u64, ()> =
        get_or_set_cache(&HangingCache, "blockNumber", CACHE_TTL, &deadline, || async { Ok(7) }).await;

    assert_eq!(value, Ok(7));
    assert!(deadline.is_expired());
}

#[tokio::test]
async fn test_producer_error_propagates_unchanged() {
    let cache = CountingCache::new();
    let deadline = Deadline::after(Duration::from_secs(5));

    let value: Result<u64, String> = get_or_set_cache(&cache, "blockNumber", CACHE_TTL, &deadline, || async {
        Err("eth_blockNumber failed".to_string())
    })
    .await;

    assert_eq!(value, Err("eth_blockNumber failed".to_string()));
    assert_eq!(cache.sets(), 0);
    assert_eq!(cache.raw("blockNumber").await, None);
}
