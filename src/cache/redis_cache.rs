// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Redis-backed cache

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use tracing::info;

use super::ValueCache;
use crate::errors::CacheError;

const BACKEND: &str = "redis";

/// [`ValueCache`] on a shared Redis instance.
///
/// Values are plain strings written with `SET key value EX ttl`, so expiry is
/// enforced by Redis itself. The connection manager reconnects on its own
/// after a dropped connection; commands issued while it is down fail and the
/// cache-aside helper falls through to the upstream node.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Connect to `url` (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let connect_error = |source: redis::RedisError| CacheError::Connect {
            url: redact_url(url),
            source: Box::new(source),
        };

        let client = redis::Client::open(url).map_err(connect_error)?;
        let connection = ConnectionManager::new(client).await.map_err(connect_error)?;

        info!(url = %redact_url(url), "Connected to Redis");
        Ok(Self { connection })
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

#[async_trait]
impl ValueCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut connection = self.connection.clone();
        let value: RedisResult<Option<String>> = connection.get(key).await;
        value.map_err(|e| CacheError::backend(BACKEND, "get", e))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        // EX takes whole seconds and rejects zero
        let seconds = ttl.as_secs().max(1);
        let result: RedisResult<()> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(seconds)
            .query_async(&mut connection)
            .await;
        result.map_err(|e| CacheError::backend(BACKEND, "set", e))
    }

    fn name(&self) -> &'static str {
        BACKEND
    }
}

/// Strip the password from a connection URL for logging.
pub(crate) fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable url>".to_string(),
    }
}
