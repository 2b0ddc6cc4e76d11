// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed values shared across the service
//!
//! The two cache keys are global on purpose: every address sees the same
//! cached fee data and block height, so their staleness depends only on the
//! TTL and never on which address was requested. Do not key them by address.

use std::time::Duration;

/// Cache key for the shared [`FeeData`](crate::FeeData) snapshot.
pub const FEE_DATA_KEY: &str = "feeData";

/// Cache key for the shared latest block number.
pub const BLOCK_NUMBER_KEY: &str = "blockNumber";

/// Lifetime of every cache entry.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

/// Port the HTTP server binds when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Per-request deadline when `REQUEST_TIMEOUT_MS` is unset.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream retry attempts when `RPC_MAX_RETRIES` is unset.
pub const DEFAULT_RPC_MAX_RETRIES: u32 = 3;

/// Database used by the MongoDB store when `MONGO_DATABASE` is unset.
pub const DEFAULT_MONGO_DATABASE: &str = "ethinfo";

/// Collection / table holding account snapshots.
pub const ACCOUNTS_COLLECTION: &str = "accounts";
