// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Record store errors.

use super::DeadlineError;

/// Errors reported by a [`RecordStore`](crate::store::RecordStore) backend.
///
/// Connectivity and constraint failures are not distinguished; both surface
/// as [`StoreError::UpsertFailed`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The upsert was rejected or could not be sent.
    #[error("Upsert into {backend} failed")]
    UpsertFailed {
        /// Backend name, e.g. "postgres"
        backend: &'static str,
        /// The underlying driver error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Could not connect or prepare the schema at startup.
    #[error("Failed to initialise {backend} store")]
    Init {
        /// Backend name
        backend: &'static str,
        /// The underlying driver error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The store call did not finish before the request deadline.
    #[error(transparent)]
    Deadline(#[from] DeadlineError),
}

impl StoreError {
    /// Helper to create an `UpsertFailed` error from any error type.
    pub fn upsert_failed(
        backend: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StoreError::UpsertFailed {
            backend,
            source: Box::new(source),
        }
    }

    /// Helper to create an `Init` error from any error type.
    pub fn init(backend: &'static str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Init {
            backend,
            source: Box::new(source),
        }
    }
}
