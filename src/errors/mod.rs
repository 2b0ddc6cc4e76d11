// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for ethinfo.
//!
//! Each collaborator has its own error type so callers can match on the
//! failure they care about:
//!
//! - [`AddressError`] - the path parameter is not a valid Ethereum address
//! - [`ChainError`] - upstream JSON-RPC failures
//! - [`CacheError`] - cache backend failures (never fatal to a request)
//! - [`StoreError`] - record store failures
//! - [`DeadlineError`] - a call outlived its request deadline or was cancelled
//! - [`ConfigError`] - invalid or missing environment configuration
//!
//! [`LookupError`] unifies the failures that can end a lookup after the address
//! has been validated. Everything converts into it via `From`, so `?` works
//! throughout the request pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use ethinfo::{LookupError, LookupService};
//!
//! match service.lookup(address, &deadline).await {
//!     Ok(info) => println!("{info:?}"),
//!     Err(err) if err.deadline().is_some() => eprintln!("too slow: {err}"),
//!     Err(err) => eprintln!("lookup failed: {err}"),
//! }
//! ```

mod address;
mod cache;
mod chain;
mod config;
mod deadline;
mod store;

pub use address::AddressError;
pub use cache::CacheError;
pub use chain::ChainError;
pub use config::ConfigError;
pub use deadline::DeadlineError;
pub use store::StoreError;

/// Failure of a lookup once the address has passed validation.
///
/// The HTTP layer reports every variant the same way; the distinction exists
/// for logs.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Reading fee data, block height or balance from the node failed.
    #[error("Upstream error: {0}")]
    Chain(#[from] ChainError),

    /// Persisting the account snapshot failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl LookupError {
    /// Returns the deadline error if this failure was a timeout or cancellation.
    pub fn deadline(&self) -> Option<&DeadlineError> {
        match self {
            LookupError::Chain(ChainError::Deadline(err)) => Some(err),
            LookupError::Store(StoreError::Deadline(err)) => Some(err),
            _ => None,
        }
    }

    /// Short label for the failing stage, used as a structured log field.
    pub fn stage(&self) -> &'static str {
        match self {
            LookupError::Chain(_) => "upstream",
            LookupError::Store(_) => "store",
        }
    }
}
