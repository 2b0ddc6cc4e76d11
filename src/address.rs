// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ethereum address validation
//!
//! Accepts the same inputs wallets and JS tooling accept: an optional `0x`
//! prefix followed by exactly 40 hex digits. All-lowercase and all-uppercase
//! digits are taken as is; mixed case must match the EIP-55 checksum.

use std::str::FromStr;

use alloy_primitives::Address;

use crate::errors::AddressError;

const ADDRESS_HEX_LEN: usize = 40;

/// Parse and validate an address string.
///
/// # Examples
///
/// ```
/// use ethinfo::{parse_address, AddressError};
///
/// assert!(parse_address("0x000000000000000000000000000000000000dEaD").is_ok());
/// assert!(parse_address("000000000000000000000000000000000000dead").is_ok());
/// assert!(matches!(
///     parse_address("0x000000000000000000000000000000000000DeaD"),
///     Err(AddressError::ChecksumMismatch { .. })
/// ));
/// ```
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
    let hex = input.strip_prefix("0x").unwrap_or(input);

    if hex.len() != ADDRESS_HEX_LEN {
        return Err(AddressError::InvalidLength { length: hex.len() });
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::InvalidCharacters);
    }

    let address = Address::from_str(hex).map_err(|_| AddressError::InvalidCharacters)?;

    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        let expected = address.to_checksum(None);
        if expected[2..] != *hex {
            return Err(AddressError::ChecksumMismatch { expected });
        }
    }

    Ok(address)
}

/// Returns `true` if [`parse_address`] would accept `input`.
pub fn is_valid_address(input: &str) -> bool {
    parse_address(input).is_ok()
}
