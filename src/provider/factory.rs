// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory

use alloy_network::Ethereum;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;
use tracing::info;

use crate::errors::ChainError;
use crate::transport::{LoggingLayer, RetryLayer};

use super::config::ProviderConfig;
use super::EthereumHttpProvider;

/// Create the upstream HTTP provider
///
/// The client stack is, outermost first: logging, retry, HTTP. Logging
/// therefore records one entry per logical call, including the time spent
/// backing off.
///
/// Recommended fillers are disabled; the service never sends transactions.
///
/// # Errors
///
/// Returns [`ChainError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: &ProviderConfig) -> Result<EthereumHttpProvider, ChainError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| ChainError::ProviderUrlInvalid(format!("{e}")))?;

    let logging = if config.log_payloads {
        LoggingLayer::new().with_payloads()
    } else {
        LoggingLayer::new()
    };

    info!(
        host = url.host_str().unwrap_or_default(),
        max_retries = config.retry.max_retries,
        "Creating upstream provider"
    );

    let client = ClientBuilder::default()
        .layer(logging)
        .layer(RetryLayer::new(config.retry.clone()))
        .http(url);

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<Ethereum>()
        .connect_client(client))
}
