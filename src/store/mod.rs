// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Persistence of [`AccountSnapshot`]s.
//!
//! Every successful lookup upserts the address's snapshot, keyed by its
//! lowercase hex form, so each store holds at most one record per address.
//! The backend is picked once at startup from
//! [`StoreBackend`](crate::config::StoreBackend):
//!
//! - [`MongoStore`]: `accounts` collection, unique index on `address`
//! - [`PostgresStore`]: `accounts` table, `address` primary key
//! - [`MemoryStore`]: process-local map for tests and local runs

use async_trait::async_trait;

use crate::deadline::Deadline;
use crate::errors::StoreError;
use crate::types::AccountSnapshot;

mod memory;
mod mongo;
mod postgres;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use postgres::PostgresStore;

/// Keyed upsert of account snapshots.
///
/// `upsert` must be idempotent per address: writing the same snapshot twice
/// leaves one record, and a later write replaces `balance` and `updatedAt`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or replace the snapshot for `snapshot.address`.
    async fn upsert(&self, snapshot: &AccountSnapshot, deadline: &Deadline) -> Result<(), StoreError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}
