// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Retry with exponential backoff for upstream JSON-RPC calls.
//!
//! The delay before retry `n` (zero-based) is
//!
//! ```text
//! delay = min(base_delay * 2^n, max_delay)
//! ```
//!
//! Only errors that a second attempt can plausibly fix are retried: transport
//! failures the transport itself flags as retryable, network failures (a
//! dropped backend or an I/O error under the HTTP client), node error responses
//! flagged as retryable (rate limits, overloaded), malformed and null
//! responses. Serialization failures and other node errors return at once.
//!
//! Retries happen inside the request [`Deadline`](crate::Deadline); a slow
//! backoff sequence is cut short by the deadline rather than by this layer.

use std::{
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket, RpcError};
use alloy_transport::{TransportError, TransportErrorKind};
use futures::future::BoxFuture;
use tower::Layer;
use tracing::{debug, warn};

/// How often and how patiently to retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Default delays with a custom retry count.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// A policy that never retries.
    pub fn never() -> Self {
        Self::with_max_retries(0)
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2u128.saturating_pow(attempt);
        let delay_ms = self.base_delay.as_millis().saturating_mul(multiplier);
        let capped_ms = delay_ms.min(self.max_delay.as_millis());
        Duration::from_millis(u64::try_from(capped_ms).unwrap_or(u64::MAX))
    }
}

/// Tower layer producing [`RetryService`]s that share one [`RetryPolicy`].
#[derive(Clone, Debug, Default)]
pub struct RetryLayer {
    policy: Arc<RetryPolicy>,
}

impl RetryLayer {
    /// Create a layer for `policy`.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// The policy this layer applies.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = RetryService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RetryService {
            service,
            policy: self.policy.clone(),
        }
    }
}

/// Service wrapper that replays failed requests according to its policy.
#[derive(Clone, Debug)]
pub struct RetryService<S> {
    service: S,
    policy: Arc<RetryPolicy>,
}

impl<S> tower::Service<RequestPacket> for RetryService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let service = self.service.clone();
        let policy = self.policy.clone();

        Box::pin(async move {
            let mut attempt = 0u32;
            loop {
                let mut service = service.clone();
                let error = match service.call(request.clone()).await {
                    Ok(response) => {
                        if attempt > 0 {
                            debug!(retries = attempt, "Upstream call recovered after retry");
                        }
                        return Ok(response);
                    }
                    Err(error) => error,
                };

                if !is_retryable(&error) || attempt >= policy.max_retries {
                    if attempt > 0 {
                        warn!(error = %error, attempts = attempt + 1, "Giving up on upstream call");
                    }
                    return Err(error);
                }

                let delay = policy.backoff(attempt);
                warn!(
                    error = %error,
                    retry = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Transient upstream failure, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        })
    }
}

/// Whether a second attempt could succeed where this one failed.
fn is_retryable(error: &TransportError) -> bool {
    match error {
        RpcError::Transport(kind) => kind.is_retry_err() || is_network_failure(kind),
        RpcError::ErrorResp(payload) => payload.is_retry_err(),
        RpcError::DeserError { .. } | RpcError::NullResp => true,
        _ => false,
    }
}

/// Dropped backends and I/O failures anywhere in the HTTP client's error chain
/// (refused or reset connections, DNS failures, socket timeouts).
fn is_network_failure(kind: &TransportErrorKind) -> bool {
    match kind {
        TransportErrorKind::BackendGone => true,
        TransportErrorKind::Custom(source) => has_io_source(source.as_ref()),
        _ => false,
    }
}

fn has_io_source(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(error) = current {
        if error.is::<std::io::Error>() {
            return true;
        }
        current = error.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use alloy_json_rpc::{Id, Request};
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy {
            max_retries: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
        };
        assert_eq!(policy.backoff(3), Duration::from_millis(500));
        assert_eq!(policy.backoff(200), Duration::from_millis(500));
    }

    #[test]
    fn test_never_policy() {
        assert_eq!(RetryPolicy::never().max_retries, 0);
        assert_eq!(RetryLayer::new(RetryPolicy::never()).policy().max_retries, 0);
    }

    #[test]
    fn test_null_response_is_retryable() {
        assert!(is_retryable(&RpcError::NullResp));
    }

    #[test]
    fn test_unsupported_feature_is_not_retryable() {
        assert!(!is_retryable(&RpcError::UnsupportedFeature("eth_subscribe")));
    }

    #[test]
    fn test_backend_gone_is_retryable() {
        assert!(is_retryable(&TransportErrorKind::backend_gone()));
    }

    #[test]
    fn test_io_error_is_retryable() {
        assert!(is_retryable(&connection_refused()));
    }

    #[test]
    fn test_nested_io_error_is_retryable() {
        let error = TransportErrorKind::custom(SendFailed(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "operation timed out",
        )));
        assert!(is_retryable(&error));
    }

    #[test]
    fn test_plain_custom_error_is_not_retryable() {
        assert!(!is_retryable(&TransportErrorKind::custom_str("invalid request body")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connection_refused_is_retried_until_budget_is_spent() {
        let upstream = ScriptedUpstream::failing(usize::MAX, connection_refused);
        let service = RetryLayer::new(RetryPolicy::default()).layer(upstream.clone());

        let started = tokio::time::Instant::now();
        let result = service.oneshot(block_number_request()).await;

        assert!(result.is_err());
        assert_eq!(upstream.calls(), 4);
        // 100 + 200 + 400 ms of backoff
        assert!(started.elapsed() >= Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failure() {
        let upstream = ScriptedUpstream::failing(1, connection_refused);
        let service = RetryLayer::new(RetryPolicy::default()).layer(upstream.clone());

        let result = service.oneshot(block_number_request()).await;

        assert!(result.is_ok());
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_is_returned_immediately() {
        let upstream = ScriptedUpstream::failing(usize::MAX, || {
            TransportErrorKind::custom_str("invalid request body")
        });
        let service = RetryLayer::new(RetryPolicy::default()).layer(upstream.clone());

        let result = service.oneshot(block_number_request()).await;

        assert!(result.is_err());
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_policy_makes_one_attempt() {
        let upstream = ScriptedUpstream::failing(usize::MAX, connection_refused);
        let service = RetryLayer::new(RetryPolicy::never()).layer(upstream.clone());

        let result = service.oneshot(block_number_request()).await;

        assert!(result.is_err());
        assert_eq!(upstream.calls(), 1);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct SendFailed(#[source] std::io::Error);

    fn connection_refused() -> TransportError {
        TransportErrorKind::custom(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))
    }

    fn block_number_request() -> RequestPacket {
        let request = Request::new("eth_blockNumber", Id::Number(1), ())
            .serialize()
            .unwrap();
        RequestPacket::Single(request)
    }

    /// Upstream that fails its first `failures` calls, then answers `0x1`.
    #[derive(Clone)]
    struct ScriptedUpstream {
        calls: Arc<AtomicUsize>,
        failures: usize,
        error: fn() -> TransportError,
    }

    impl ScriptedUpstream {
        fn failing(failures: usize, error: fn() -> TransportError) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                failures,
                error,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl tower::Service<RequestPacket> for ScriptedUpstream {
        type Response = ResponsePacket;
        type Error = TransportError;
        type Future = BoxFuture<'static, Result<ResponsePacket, TransportError>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _request: RequestPacket) -> Self::Future {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if call < self.failures {
                Err((self.error)())
            } else {
                Ok(serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#).unwrap())
            };
            Box::pin(async move { result })
        }
    }
}
