// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors for upstream JSON-RPC reads.

use alloy_primitives::Address;

use super::DeadlineError;

/// Errors that can occur while reading from the upstream node.
///
/// Every variant except [`ChainError::Deadline`] and
/// [`ChainError::ProviderUrlInvalid`] carries the underlying transport error as
/// its source. Transient transport errors have already been retried by the
/// time one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// `eth_gasPrice` or the latest-block lookup backing fee data failed.
    #[error("Failed to get fee data")]
    GetFeeDataFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// `eth_blockNumber` failed.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// `eth_getBalance` failed.
    #[error("Failed to get balance of {address}")]
    GetBalanceFailed {
        /// The address whose balance was requested
        address: Address,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured RPC URL could not be parsed.
    #[error("Invalid RPC URL: {0}")]
    ProviderUrlInvalid(String),

    /// The call did not finish before the request deadline.
    #[error(transparent)]
    Deadline(#[from] DeadlineError),
}

impl ChainError {
    /// Helper to create a `GetFeeDataFailed` error from any error type.
    pub fn get_fee_data_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        ChainError::GetFeeDataFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        ChainError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBalanceFailed` error from any error type.
    pub fn get_balance_failed(
        address: Address,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ChainError::GetBalanceFailed {
            address,
            source: Box::new(source),
        }
    }
}
