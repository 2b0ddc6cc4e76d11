// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! MongoDB record store

use async_trait::async_trait;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use tracing::info;

use super::RecordStore;
use crate::config::constants::ACCOUNTS_COLLECTION;
use crate::deadline::Deadline;
use crate::errors::StoreError;
use crate::types::AccountSnapshot;

const BACKEND: &str = "mongodb";

/// [`RecordStore`] writing to the `accounts` collection.
///
/// Documents look like `{ address, balance, updatedAt }`. A unique index on
/// `address` is created at connect time so concurrent upserts for the same
/// address cannot produce duplicates.
#[derive(Debug, Clone)]
pub struct MongoStore {
    accounts: Collection<Document>,
}

impl MongoStore {
    /// Connect to `uri`, verify the server answers, and ensure the index.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::init(BACKEND, e))?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::init(BACKEND, e))?;

        let accounts = db.collection::<Document>(ACCOUNTS_COLLECTION);
        let index = IndexModel::builder()
            .keys(doc! { "address": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        accounts
            .create_index(index)
            .await
            .map_err(|e| StoreError::init(BACKEND, e))?;

        info!(database, collection = ACCOUNTS_COLLECTION, "Connected to MongoDB");
        Ok(Self { accounts })
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn upsert(&self, snapshot: &AccountSnapshot, deadline: &Deadline) -> Result<(), StoreError> {
        let filter = doc! { "address": snapshot.address.as_str() };
        let update = doc! {
            "$set": {
                "balance": snapshot.balance.as_str(),
                "updatedAt": BsonDateTime::from_millis(snapshot.updated_at.timestamp_millis()),
            }
        };

        deadline
            .run("store.upsert", self.accounts.update_one(filter, update).upsert(true))
            .await?
            .map_err(|e| StoreError::upsert_failed(BACKEND, e))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        BACKEND
    }
}
