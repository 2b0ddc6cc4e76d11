// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network fee data as served from the cache

use serde::{Deserialize, Serialize};

use super::WeiAmount;

/// Priority fee assumed when deriving EIP-1559 fields (1 gwei).
pub const DEFAULT_PRIORITY_FEE_WEI: u128 = 1_000_000_000;

/// Current network fee metrics read from the upstream node.
///
/// `gas_price` always comes from `eth_gasPrice`. When the latest block carries
/// a base fee the EIP-1559 fields are derived from it as
/// `max_fee = 2 * base_fee + priority_fee`, with a fixed 1 gwei priority fee.
///
/// This is the value stored under the global `feeData` cache key, so its JSON
/// shape is part of the cache format.
///
/// # Examples
///
/// ```
/// use ethinfo::{FeeData, WeiAmount};
///
/// let fees = FeeData::from_parts(WeiAmount::from(30_000_000_000u64), Some(10_000_000_000));
/// assert_eq!(fees.max_fee_per_gas, Some(WeiAmount::from(21_000_000_000u64)));
///
/// let legacy = FeeData::from_parts(WeiAmount::from(30_000_000_000u64), None);
/// assert!(legacy.max_fee_per_gas.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeData {
    /// Legacy gas price
    pub gas_price: WeiAmount,
    /// EIP-1559 max fee per gas, absent on pre-London chains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<WeiAmount>,
    /// EIP-1559 max priority fee per gas, absent on pre-London chains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<WeiAmount>,
}

impl FeeData {
    /// Build fee data from the gas price and the latest block's base fee, if any.
    pub fn from_parts(gas_price: WeiAmount, base_fee_per_gas: Option<u64>) -> Self {
        match base_fee_per_gas {
            Some(base_fee) => {
                let priority = DEFAULT_PRIORITY_FEE_WEI;
                let max_fee = u128::from(base_fee)
                    .saturating_mul(2)
                    .saturating_add(priority);
                Self {
                    gas_price,
                    max_fee_per_gas: Some(WeiAmount::from(max_fee)),
                    max_priority_fee_per_gas: Some(WeiAmount::from(priority)),
                }
            }
            None => Self::legacy(gas_price),
        }
    }

    /// Fee data with only a gas price.
    pub fn legacy(gas_price: WeiAmount) -> Self {
        Self {
            gas_price,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
        }
    }
}
