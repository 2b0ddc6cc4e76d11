// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for ethinfo integration tests
//!
//! Counting mocks for the three collaborators so tests can assert exactly
//! which outbound calls a request made, plus a small driver for the router.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use ethinfo::{
    api, AccountSnapshot, AppState, CacheError, ChainError, ChainReader, Deadline, FeeData,
    MemoryCache, RecordStore, StoreError, ValueCache, WeiAmount,
};
use serde_json::Value;
use tower::ServiceExt;

/// 1.5 ETH in wei
pub const ONE_AND_A_HALF_ETH: u128 = 1_500_000_000_000_000_000;

/// 12.5 gwei in wei
pub const TWELVE_AND_A_HALF_GWEI: u64 = 12_500_000_000;

/// Mock ChainReader that counts every call
///
/// Balances are the same for every address. The block number can be changed
/// between requests to observe cache refreshes.
///
/// # Example
///
/// ```rust,ignore
/// let chain = Arc::new(MockChainReader::new().with_balance(ONE_AND_A_HALF_ETH));
/// let (router, _) = test_app(chain.clone());
/// // ... drive the router ...
/// assert_eq!(chain.balance_calls(), 1);
/// ```
pub struct MockChainReader {
    gas_price: WeiAmount,
    base_fee: Option<u64>,
    block_number: AtomicU64,
    balance: WeiAmount,
    fail_balance: AtomicBool,
    hang_balance: AtomicBool,
    fee_calls: AtomicUsize,
    block_calls: AtomicUsize,
    balance_calls: AtomicUsize,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self {
            gas_price: WeiAmount::from(TWELVE_AND_A_HALF_GWEI),
            base_fee: Some(10_000_000_000),
            block_number: AtomicU64::new(19_000_000),
            balance: WeiAmount::ZERO,
            fail_balance: AtomicBool::new(false),
            hang_balance: AtomicBool::new(false),
            fee_calls: AtomicUsize::new(0),
            block_calls: AtomicUsize::new(0),
            balance_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_balance(mut self, wei: u128) -> Self {
        self.balance = WeiAmount::from(wei);
        self
    }

    pub fn with_gas_price(mut self, wei: u64) -> Self {
        self.gas_price = WeiAmount::from(wei);
        self
    }

    /// Balance reads fail with an upstream error.
    pub fn failing_balance(self) -> Self {
        self.fail_balance.store(true, Ordering::SeqCst);
        self
    }

    /// Balance reads never complete on their own.
    pub fn hanging_balance(self) -> Self {
        self.hang_balance.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_block_number(&self, block: u64) {
        self.block_number.store(block, Ordering::SeqCst);
    }

    pub fn fee_calls(&self) -> usize {
        self.fee_calls.load(Ordering::SeqCst)
    }

    pub fn block_calls(&self) -> usize {
        self.block_calls.load(Ordering::SeqCst)
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.fee_calls() + self.block_calls() + self.balance_calls()
    }
}

impl Default for MockChainReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn fee_data(&self, _deadline: &Deadline) -> Result<FeeData, ChainError> {
        self.fee_calls.fetch_add(1, Ordering::SeqCst);
        Ok(FeeData::from_parts(self.gas_price, self.base_fee))
    }

    async fn block_number(&self, _deadline: &Deadline) -> Result<u64, ChainError> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.block_number.load(Ordering::SeqCst))
    }

    async fn balance(&self, address: Address, deadline: &Deadline) -> Result<WeiAmount, ChainError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);

        if self.hang_balance.load(Ordering::SeqCst) {
            deadline
                .run("eth_getBalance", std::future::pending::<()>())
                .await?;
        }
        if self.fail_balance.load(Ordering::SeqCst) {
            return Err(ChainError::get_balance_failed(
                address,
                std::io::Error::other("upstream unavailable"),
            ));
        }
        Ok(self.balance)
    }
}

/// Memory cache that counts calls reaching it
#[derive(Default)]
pub struct CountingCache {
    inner: MemoryCache,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl CountingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.ok().flatten()
    }
}

#[async_trait]
impl ValueCache for CountingCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Cache whose every call fails, as if Redis were down
#[derive(Default)]
pub struct FailingCache {
    calls: AtomicUsize,
}

impl FailingCache {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValueCache for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::backend(
            "failing",
            "get",
            std::io::Error::other("connection refused"),
        ))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::backend(
            "failing",
            "set",
            std::io::Error::other("connection refused"),
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Store that records every upsert it receives
#[derive(Default)]
pub struct RecordingStore {
    upserts: Mutex<Vec<AccountSnapshot>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upserts(&self) -> Vec<AccountSnapshot> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn upsert(&self, snapshot: &AccountSnapshot, _deadline: &Deadline) -> Result<(), StoreError> {
        self.upserts.lock().unwrap().push(snapshot.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Store whose every upsert fails
#[derive(Default)]
pub struct FailingStore {
    attempts: AtomicUsize,
}

impl FailingStore {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn upsert(&self, _snapshot: &AccountSnapshot, _deadline: &Deadline) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::upsert_failed(
            "failing",
            std::io::Error::other("duplicate key"),
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// The three collaborators behind a test router
pub struct Harness {
    pub chain: Arc<MockChainReader>,
    pub cache: Arc<CountingCache>,
    pub store: Arc<RecordingStore>,
    pub router: Router,
}

impl Harness {
    /// Router over `chain` with a counting cache and a recording store.
    pub fn new(chain: MockChainReader) -> Self {
        let chain = Arc::new(chain);
        let cache = Arc::new(CountingCache::new());
        let store = Arc::new(RecordingStore::new());
        let router = api::router(AppState::new(chain.clone(), cache.clone(), store.clone()));
        Self {
            chain,
            cache,
            store,
            router,
        }
    }
}

/// Send `GET uri` through `router` and decode the JSON body.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
