// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory record store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::deadline::Deadline;
use crate::errors::StoreError;
use crate::types::AccountSnapshot;

/// [`RecordStore`] backed by a `HashMap` keyed on the lowercase address.
///
/// Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, AccountSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored snapshot for `address`, matched case-insensitively.
    pub async fn get(&self, address: &str) -> Option<AccountSnapshot> {
        self.records
            .read()
            .await
            .get(&address.to_lowercase())
            .cloned()
    }

    /// Number of stored snapshots.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(&self, snapshot: &AccountSnapshot, deadline: &Deadline) -> Result<(), StoreError> {
        let mut records = deadline.run("store.upsert", self.records.write()).await?;
        records.insert(snapshot.address.clone(), snapshot.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
