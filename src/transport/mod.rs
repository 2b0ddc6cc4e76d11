// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower middleware for the upstream RPC client.
//!
//! - [`RetryLayer`] retries transient transport failures with exponential backoff
//! - [`LoggingLayer`] records method, duration and failures of every call
//!
//! Both are installed by [`create_http_provider`](crate::provider::create_http_provider):
//!
//! ```rust,ignore
//! use alloy_rpc_client::ClientBuilder;
//! use ethinfo::transport::{LoggingLayer, RetryLayer, RetryPolicy};
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::new())
//!     .layer(RetryLayer::new(RetryPolicy::default()))
//!     .http(rpc_url);
//! ```

mod logging;
mod retry;

pub use logging::{LoggingLayer, LoggingService};
pub use retry::{RetryLayer, RetryPolicy, RetryService};
