// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

use crate::config::ServiceConfig;
use crate::transport::RetryPolicy;

/// Configuration for creating the upstream provider
///
/// # Example
///
/// ```rust
/// use ethinfo::provider::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::new("https://eth.llamarpc.com")
///     .with_max_retries(5)
///     .with_base_delay(Duration::from_millis(250));
/// assert_eq!(config.retry.max_retries, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
    /// Log request/response payloads at trace level
    pub log_payloads: bool,
}

impl ProviderConfig {
    /// Create a provider configuration with default retries
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            retry: RetryPolicy::default(),
            log_payloads: false,
        }
    }

    /// Derive the provider settings from the service configuration
    #[must_use]
    pub fn from_service(config: &ServiceConfig) -> Self {
        let mut provider = Self::new(config.rpc_url.clone()).with_max_retries(config.rpc_max_retries);
        provider.log_payloads = config.rpc_log_payloads;
        provider
    }

    /// Set the number of retries after the first attempt
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    /// Set the delay before the first retry
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.retry.base_delay = delay;
        self
    }

    /// Enable payload logging
    #[must_use]
    pub fn with_payload_logging(mut self) -> Self {
        self.log_payloads = true;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("http://localhost:8545")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfigBuilder;

    #[test]
    fn test_provider_config_new() {
        let config = ProviderConfig::new("https://eth.llamarpc.com");
        assert_eq!(config.url, "https://eth.llamarpc.com");
        assert_eq!(config.retry, RetryPolicy::default());
        assert!(!config.log_payloads);
    }

    #[test]
    fn test_from_service_carries_retries() {
        let service = ServiceConfigBuilder::new("http://node:8545")
            .rpc_max_retries(1)
            .build();
        let config = ProviderConfig::from_service(&service);
        assert_eq!(config.url, "http://node:8545");
        assert_eq!(config.retry.max_retries, 1);
    }

    #[test]
    fn test_default_is_local_node() {
        assert_eq!(ProviderConfig::default().url, "http://localhost:8545");
    }
}
