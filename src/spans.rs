// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for ethinfo operations.
//!
//! Telemetry stays out of business logic: instead of `#[instrument]` on the
//! functions themselves, each instrumented operation has a helper here and the
//! caller attaches it with `Instrument::instrument`.
//!
//! ```rust,ignore
//! async fn my_operation(&self, address: Address) -> Result<T, E> {
//!     async { /* business logic */ }
//!         .instrument(spans::my_operation(address))
//!         .await
//! }
//! ```

use alloy_primitives::Address;
use tracing::Span;

/// Root span for one address lookup.
///
/// Children: cache_aside (x2), chain_balance, store_upsert
#[inline]
pub(crate) fn lookup(address: Address) -> Span {
    tracing::info_span!("ethinfo.lookup", address = %address)
}

/// Span for one cache-aside read-through.
///
/// Parent: lookup
/// Children: the producer's chain span on a miss
#[inline]
pub(crate) fn cache_aside(key: &str, backend: &'static str) -> Span {
    tracing::debug_span!(
        "ethinfo.cache_aside",
        key = key,
        backend = backend,
        hit = tracing::field::Empty,
    )
}

/// Span for fetching fee data from the node.
#[inline]
pub(crate) fn chain_fee_data() -> Span {
    tracing::debug_span!("ethinfo.chain.fee_data")
}

/// Span for fetching the latest block number from the node.
#[inline]
pub(crate) fn chain_block_number() -> Span {
    tracing::debug_span!("ethinfo.chain.block_number")
}

/// Span for fetching a balance from the node. Never cached.
#[inline]
pub(crate) fn chain_balance(address: Address) -> Span {
    tracing::debug_span!("ethinfo.chain.balance", address = %address)
}

/// Span for persisting an account snapshot.
#[inline]
pub(crate) fn store_upsert(backend: &'static str) -> Span {
    tracing::debug_span!("ethinfo.store.upsert", backend = backend)
}
