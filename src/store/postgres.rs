// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Postgres record store

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use super::RecordStore;
use crate::deadline::Deadline;
use crate::errors::StoreError;
use crate::types::AccountSnapshot;

const BACKEND: &str = "postgres";

const CREATE_ACCOUNTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        address    TEXT PRIMARY KEY,
        balance    TEXT NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const UPSERT_ACCOUNT: &str = r#"
    INSERT INTO accounts (address, balance, updated_at)
    VALUES ($1, $2, $3)
    ON CONFLICT (address)
    DO UPDATE SET
        balance = EXCLUDED.balance,
        updated_at = EXCLUDED.updated_at
"#;

/// [`RecordStore`] writing to the `accounts` table.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open a pool on `uri` and create the `accounts` table if missing.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(3))
            .connect(uri)
            .await
            .map_err(|e| StoreError::init(BACKEND, e))?;

        let store = Self::from_pool(pool);
        store.ensure_schema().await?;

        info!("Database connection pool created successfully");
        Ok(store)
    }

    /// Wrap an existing pool. The schema is not checked.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `accounts` table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ACCOUNTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::init(BACKEND, e))?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn upsert(&self, snapshot: &AccountSnapshot, deadline: &Deadline) -> Result<(), StoreError> {
        let query = sqlx::query(UPSERT_ACCOUNT)
            .bind(&snapshot.address)
            .bind(&snapshot.balance)
            .bind(snapshot.updated_at)
            .execute(&self.pool);

        deadline
            .run("store.upsert", query)
            .await?
            .map_err(|e| StoreError::upsert_failed(BACKEND, e))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        BACKEND
    }
}
