// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-request deadlines for outbound calls
//!
//! Every upstream, cache and store call made on behalf of a request runs under
//! the request's [`Deadline`]. A deadline combines an absolute expiry instant
//! with a [`CancellationToken`]; the token is normally a child of the server's
//! shutdown token so in-flight calls stop when the server does.
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use ethinfo::Deadline;
//!
//! let deadline = Deadline::after(Duration::from_secs(5));
//! let balance = deadline.run("eth_getBalance", provider.get_balance(address)).await??;
//! ```

use std::future::IntoFuture;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::DeadlineError;

/// Expiry instant plus cancellation token for one request.
///
/// Cloning a deadline shares the token: cancelling any clone cancels all.
#[derive(Debug, Clone)]
pub struct Deadline {
    expires_at: Instant,
    token: CancellationToken,
}

impl Deadline {
    /// A deadline `timeout` from now with a fresh, unlinked token.
    pub fn after(timeout: Duration) -> Self {
        Self::with_token(timeout, CancellationToken::new())
    }

    /// A deadline `timeout` from now that is cancelled together with `parent`.
    pub fn child_of(parent: &CancellationToken, timeout: Duration) -> Self {
        Self::with_token(timeout, parent.child_token())
    }

    /// A deadline `timeout` from now using `token` as is.
    pub fn with_token(timeout: Duration, token: CancellationToken) -> Self {
        Self {
            expires_at: Instant::now() + timeout,
            token,
        }
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Whether the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Cancel this deadline and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the deadline has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `call` to completion unless the deadline expires or is cancelled first.
    ///
    /// Cancellation wins over completion when both are ready, so a cancelled
    /// deadline never starts new work.
    pub async fn run<F>(&self, operation: &'static str, call: F) -> Result<F::Output, DeadlineError>
    where
        F: IntoFuture,
    {
        let call = call.into_future();
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(DeadlineError::Cancelled { operation }),
            output = call => Ok(output),
            _ = tokio::time::sleep_until(self.expires_at) => Err(DeadlineError::TimedOut { operation }),
        }
    }
}
