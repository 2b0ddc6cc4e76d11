// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # ethinfo
//!
//! An HTTP service that answers one question per request: for a given Ethereum
//! address, what are the current gas price, the latest block number, and the
//! address's balance?
//!
//! Fee data and block height are read through a short-lived cache shared by
//! all addresses; the balance is always read live from the upstream node and
//! persisted as the address's latest [`AccountSnapshot`].
//!
//! ## Layout
//!
//! - [`chain`]: the [`ChainReader`] seam over an alloy provider
//! - [`cache`]: [`ValueCache`] backends and the [`get_or_set_cache`] helper
//! - [`store`]: [`RecordStore`] backends (MongoDB, Postgres, in-memory)
//! - [`lookup`]: the request pipeline, independent of HTTP
//! - [`api`]: the axum router and error mapping
//! - [`bootstrap`]: configuration, wiring and the server loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ethinfo::{api, AppState, MemoryCache, MemoryStore};
//!
//! let state = AppState::new(Arc::new(reader), Arc::new(MemoryCache::new()), Arc::new(MemoryStore::new()));
//! let app = api::router(state);
//! ```

pub mod address;
pub mod api;
pub mod bootstrap;
pub mod cache;
pub mod chain;
pub mod config;
pub mod deadline;
pub mod errors;
pub mod lookup;
pub mod provider;
mod spans;
pub mod store;
pub mod transport;
pub mod types;

pub use address::{is_valid_address, parse_address};
pub use api::AppState;
pub use cache::{get_or_set_cache, MemoryCache, NoOpCache, RedisCache, ValueCache};
pub use chain::{AlloyChainReader, ChainReader};
pub use config::{ServiceConfig, ServiceConfigBuilder, StoreBackend};
pub use deadline::Deadline;
pub use errors::{
    AddressError, CacheError, ChainError, ConfigError, DeadlineError, LookupError, StoreError,
};
pub use lookup::{EthInfo, LookupService};
pub use store::{MemoryStore, MongoStore, PostgresStore, RecordStore};
pub use types::{AccountSnapshot, FeeData, WeiAmount};
