// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ChainReader`] backed by an alloy provider

use std::marker::PhantomData;

use alloy_consensus::BlockHeader;
use alloy_network::{BlockResponse, Ethereum, Network};
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_rpc_types::BlockNumberOrTag;
use async_trait::async_trait;
use tracing::{debug, Instrument};

use super::ChainReader;
use crate::deadline::Deadline;
use crate::errors::ChainError;
use crate::spans;
use crate::types::{FeeData, WeiAmount};

/// Reads fee data, block height and balances through an alloy provider.
///
/// Transient failures are retried by the provider's transport stack (see
/// [`create_http_provider`](crate::provider::create_http_provider)); this type
/// only bounds each call by the request deadline and maps errors.
///
/// # Example
///
/// ```rust,ignore
/// use ethinfo::{AlloyChainReader, ChainReader, Deadline};
/// use std::time::Duration;
///
/// let reader = AlloyChainReader::new(provider);
/// let height = reader.block_number(&Deadline::after(Duration::from_secs(5))).await?;
/// ```
pub struct AlloyChainReader<P, N = Ethereum> {
    provider: P,
    _network: PhantomData<fn() -> N>,
}

impl<P, N> AlloyChainReader<P, N>
where
    N: Network,
    P: Provider<N>,
{
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _network: PhantomData,
        }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P, N> ChainReader for AlloyChainReader<P, N>
where
    N: Network,
    P: Provider<N> + 'static,
{
    async fn fee_data(&self, deadline: &Deadline) -> Result<FeeData, ChainError> {
        async {
            let gas_price = deadline
                .run("eth_gasPrice", self.provider.get_gas_price())
                .await?
                .map_err(ChainError::get_fee_data_failed)?;

            let latest = deadline
                .run(
                    "eth_getBlockByNumber",
                    self.provider.get_block_by_number(BlockNumberOrTag::Latest),
                )
                .await?
                .map_err(ChainError::get_fee_data_failed)?;

            let base_fee = latest.and_then(|block| block.header().base_fee_per_gas());
            debug!(gas_price, ?base_fee, "Fetched fee data");

            Ok::<_, ChainError>(FeeData::from_parts(WeiAmount::from(gas_price), base_fee))
        }
        .instrument(spans::chain_fee_data())
        .await
    }

    async fn block_number(&self, deadline: &Deadline) -> Result<u64, ChainError> {
        deadline
            .run("eth_blockNumber", self.provider.get_block_number())
            .instrument(spans::chain_block_number())
            .await?
            .map_err(ChainError::get_block_number_failed)
    }

    async fn balance(&self, address: Address, deadline: &Deadline) -> Result<WeiAmount, ChainError> {
        deadline
            .run("eth_getBalance", self.provider.get_balance(address))
            .instrument(spans::chain_balance(address))
            .await?
            .map(WeiAmount::from)
            .map_err(|e| ChainError::get_balance_failed(address, e))
    }
}
