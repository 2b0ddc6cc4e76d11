// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The per-address lookup pipeline, independent of HTTP.
//!
//! For a validated address:
//!
//! 1. fee data and block number through the cache (concurrently)
//! 2. balance straight from the node
//! 3. upsert the [`AccountSnapshot`]
//! 4. assemble the [`EthInfo`] response body
//!
//! Any failure in steps 1 to 3 ends the lookup; nothing partial is returned.

use std::sync::Arc;

use alloy_primitives::Address;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, Instrument};

use crate::cache::{get_or_set_cache, CacheStats, ValueCache};
use crate::chain::ChainReader;
use crate::config::constants::{BLOCK_NUMBER_KEY, CACHE_TTL, FEE_DATA_KEY};
use crate::deadline::Deadline;
use crate::errors::LookupError;
use crate::spans;
use crate::store::RecordStore;
use crate::types::{AccountSnapshot, FeeData};

/// Response body of a successful lookup.
///
/// ```json
/// { "gasPrice": "12.5", "blockNumber": 19000000, "balance": "1.5" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthInfo {
    /// Network gas price in gwei
    pub gas_price: String,
    /// Latest block number
    pub block_number: u64,
    /// Account balance in ether
    pub balance: String,
}

/// Runs lookups against a chain reader, a cache and a record store.
///
/// Cheap to clone; all collaborators are shared.
#[derive(Clone)]
pub struct LookupService {
    chain: Arc<dyn ChainReader>,
    cache: Arc<dyn ValueCache>,
    store: Arc<dyn RecordStore>,
}

impl LookupService {
    pub fn new(
        chain: Arc<dyn ChainReader>,
        cache: Arc<dyn ValueCache>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            chain,
            cache,
            store,
        }
    }

    /// Look up `address`, persisting its snapshot on success.
    ///
    /// Fee data and block number are shared across addresses and may be up to
    /// a minute old; the balance is always read live.
    pub async fn lookup(&self, address: Address, deadline: &Deadline) -> Result<EthInfo, LookupError> {
        async move {
            let fee_data = get_or_set_cache(
                self.cache.as_ref(),
                FEE_DATA_KEY,
                CACHE_TTL,
                deadline,
                || self.chain.fee_data(deadline),
            );
            let block_number = get_or_set_cache(
                self.cache.as_ref(),
                BLOCK_NUMBER_KEY,
                CACHE_TTL,
                deadline,
                || self.chain.block_number(deadline),
            );
            let (fee_data, block_number): (FeeData, u64) = tokio::try_join!(fee_data, block_number)?;

            let balance = self.chain.balance(address, deadline).await?;

            let snapshot = AccountSnapshot::new(address, balance, Utc::now());
            self.store
                .upsert(&snapshot, deadline)
                .instrument(spans::store_upsert(self.store.name()))
                .await?;

            let info = EthInfo {
                gas_price: fee_data.gas_price.to_gwei_string(),
                block_number,
                balance: snapshot.balance,
            };
            debug!(
                gas_price = %info.gas_price,
                block_number = info.block_number,
                balance = %info.balance,
                "Lookup complete"
            );
            Ok::<_, LookupError>(info)
        }
        .instrument(spans::lookup(address))
        .await
    }

    /// Counters of the shared cache, if its backend keeps any.
    pub async fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.stats().await
    }
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("cache", &self.cache.name())
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}
