// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache backend errors.
//!
//! These never fail a request: the cache-aside helper logs them and falls
//! through to the producer.

use super::DeadlineError;

/// Errors reported by a [`ValueCache`](crate::cache::ValueCache) backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The backend rejected or failed the command.
    #[error("Cache {operation} failed on {backend}")]
    Backend {
        /// Backend name, e.g. "redis"
        backend: &'static str,
        /// The command that failed ("get" or "set")
        operation: &'static str,
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Could not connect to the backend at startup.
    #[error("Failed to connect to cache at {url}")]
    Connect {
        /// The connection URL, password masked
        url: String,
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A value could not be encoded for storage.
    #[error("Failed to encode value for key {key}")]
    Encode {
        /// The cache key
        key: String,
        /// The serialization error
        #[source]
        source: serde_json::Error,
    },

    /// The cache call did not finish before the request deadline.
    #[error(transparent)]
    Deadline(#[from] DeadlineError),
}

impl CacheError {
    /// Helper to create a `Backend` error from any error type.
    pub fn backend(
        backend: &'static str,
        operation: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CacheError::Backend {
            backend,
            operation,
            source: Box::new(source),
        }
    }
}
