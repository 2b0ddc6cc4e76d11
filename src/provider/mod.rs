// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream provider construction
//!
//! The service talks to exactly one Ethereum node over HTTP. This module turns
//! a [`ProviderConfig`] into an alloy provider with the retry and logging
//! middleware from [`transport`](crate::transport) installed.
//!
//! ```rust,ignore
//! use ethinfo::provider::{create_http_provider, ProviderConfig};
//! use ethinfo::AlloyChainReader;
//!
//! let provider = create_http_provider(&ProviderConfig::new("https://eth.llamarpc.com"))?;
//! let reader = AlloyChainReader::new(provider);
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::create_http_provider;

/// HTTP provider for Ethereum mainnet-compatible nodes
pub type EthereumHttpProvider = alloy_provider::RootProvider<alloy_network::Ethereum>;
