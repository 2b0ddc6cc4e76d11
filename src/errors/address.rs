// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address validation errors.

/// Reasons an input string is not accepted as an Ethereum address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The input does not contain exactly 40 hex digits after the optional `0x`.
    #[error("Address must have 40 hex digits, got {length}")]
    InvalidLength {
        /// Number of characters after the optional prefix
        length: usize,
    },

    /// The input contains characters outside `[0-9a-fA-F]`.
    #[error("Address contains non-hex characters")]
    InvalidCharacters,

    /// The input is mixed case but does not match its EIP-55 checksum.
    #[error("Address checksum mismatch, expected {expected}")]
    ChecksumMismatch {
        /// The correctly checksummed form of the address
        expected: String,
    },
}
