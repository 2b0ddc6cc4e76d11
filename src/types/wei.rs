// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for native currency amounts
//!
//! Amounts are held in wei and rendered in gwei or ether with exact integer
//! arithmetic. Rendering never goes through `f64`.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Decimal places between wei and gwei.
pub const GWEI_DECIMALS: u8 = 9;

/// Decimal places between wei and ether.
pub const ETHER_DECIMALS: u8 = 18;

/// Represents an amount of native currency (ETH) in wei
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use ethinfo::WeiAmount;
///
/// let balance = WeiAmount::new(U256::from(1_500_000_000_000_000_000u128));
/// assert_eq!(balance.to_ether_string(), "1.5");
///
/// let gas_price = WeiAmount::from(25_000_000_000u64);
/// assert_eq!(gas_price.to_gwei_string(), "25.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new wei amount
    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Get the inner U256 value (in wei)
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Render in gwei (1 gwei = 10^9 wei)
    pub fn to_gwei_string(&self) -> String {
        format_units(self.0, GWEI_DECIMALS)
    }

    /// Render in ether (1 ETH = 10^18 wei)
    pub fn to_ether_string(&self) -> String {
        format_units(self.0, ETHER_DECIMALS)
    }
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for WeiAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

/// Render `value` scaled down by `10^decimals` as a decimal string.
///
/// Trailing zeros in the fractional part are dropped but at least one
/// fractional digit is kept, so whole amounts render as `"1.0"` and zero as
/// `"0.0"`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use ethinfo::types::format_units;
///
/// assert_eq!(format_units(U256::from(1_234_500u64), 6), "1.2345");
/// assert_eq!(format_units(U256::from(7u64), 3), "0.007");
/// ```
pub fn format_units(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let (whole, fraction) = value.div_rem(divisor);

    let digits = fraction.to_string();
    let padded = format!("{digits:0>width$}", width = usize::from(decimals));
    let trimmed = padded.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}
