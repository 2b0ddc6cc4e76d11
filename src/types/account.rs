// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The per-address record written on every successful lookup

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WeiAmount;

/// Last-seen balance of an address.
///
/// One snapshot exists per address; each lookup overwrites it. Nothing in this
/// service deletes snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    /// Lowercase, `0x`-prefixed hex address. This is the record key.
    pub address: String,
    /// Balance in ether as an exact decimal string
    pub balance: String,
    /// When this snapshot was taken
    pub updated_at: DateTime<Utc>,
}

impl AccountSnapshot {
    /// Build a snapshot from a wei balance.
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_primitives::address;
    /// use chrono::Utc;
    /// use ethinfo::{AccountSnapshot, WeiAmount};
    ///
    /// let snapshot = AccountSnapshot::new(
    ///     address!("000000000000000000000000000000000000dEaD"),
    ///     WeiAmount::from(1_500_000_000_000_000_000u128),
    ///     Utc::now(),
    /// );
    /// assert_eq!(snapshot.address, "0x000000000000000000000000000000000000dead");
    /// assert_eq!(snapshot.balance, "1.5");
    /// ```
    pub fn new(address: Address, balance: WeiAmount, updated_at: DateTime<Utc>) -> Self {
        Self {
            address: address_key(&address),
            balance: balance.to_ether_string(),
            updated_at,
        }
    }
}

/// The lowercase `0x`-prefixed form used as the record key.
pub fn address_key(address: &Address) -> String {
    address.to_string().to_lowercase()
}
