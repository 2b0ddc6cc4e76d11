// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Reads from the upstream Ethereum node
//!
//! [`ChainReader`] is the seam between the lookup pipeline and the network.
//! The production implementation, [`AlloyChainReader`], is generic over any
//! alloy [`Provider`](alloy_provider::Provider); tests substitute counting
//! mocks.
//!
//! Every read takes the request [`Deadline`] and fails with
//! [`ChainError::Deadline`] once it passes.

mod reader;

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::deadline::Deadline;
use crate::errors::ChainError;
use crate::types::{FeeData, WeiAmount};

pub use reader::AlloyChainReader;

/// Read-only access to the three values a lookup needs.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Current fee data (gas price, plus EIP-1559 fields when available).
    async fn fee_data(&self, deadline: &Deadline) -> Result<FeeData, ChainError>;

    /// Latest block number.
    async fn block_number(&self, deadline: &Deadline) -> Result<u64, ChainError>;

    /// Balance of `address` at the latest block, in wei.
    async fn balance(&self, address: Address, deadline: &Deadline) -> Result<WeiAmount, ChainError>;
}
