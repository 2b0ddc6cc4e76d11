// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface.
//!
//! | Route | Response |
//! |---|---|
//! | `GET /eth-info/:address` | `200 {gasPrice, blockNumber, balance}`, `400` or `500` |
//! | `GET /health` | `200 {status: "ok"}` |
//!
//! Error bodies are fixed strings; see [`ApiError`].

mod error;
mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::cache::ValueCache;
use crate::chain::ChainReader;
use crate::config::constants::DEFAULT_REQUEST_TIMEOUT;
use crate::deadline::Deadline;
use crate::lookup::LookupService;
use crate::store::RecordStore;

pub use error::{ApiError, FETCH_FAILED_MESSAGE, INVALID_ADDRESS_MESSAGE};

/// Shared state handed to every request.
#[derive(Clone, Debug)]
pub struct AppState {
    lookup: LookupService,
    request_timeout: Duration,
    shutdown: CancellationToken,
}

impl AppState {
    /// State with the default request timeout and a fresh shutdown token.
    pub fn new(
        chain: Arc<dyn ChainReader>,
        cache: Arc<dyn ValueCache>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            lookup: LookupService::new(chain, cache, store),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown: CancellationToken::new(),
        }
    }

    /// Budget for all upstream, cache and store calls of one request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Cancelling `token` aborts every in-flight request's outbound calls.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn lookup(&self) -> &LookupService {
        &self.lookup
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// A fresh deadline for one request, linked to the shutdown token.
    pub fn request_deadline(&self) -> Deadline {
        Deadline::child_of(&self.shutdown, self.request_timeout)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/eth-info/:address", get(handlers::eth_info))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
