// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! No-operation cache that disables caching entirely

use async_trait::async_trait;
use std::time::Duration;

use super::ValueCache;
use crate::errors::CacheError;

/// A cache that never holds anything.
///
/// Every read misses and every write is dropped, so each lookup goes to the
/// upstream node. Useful when debugging staleness or measuring node latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

#[async_trait]
impl ValueCache for NoOpCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
