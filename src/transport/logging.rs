// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-call logging for upstream JSON-RPC traffic.
//!
//! Each call runs inside an `ethinfo.rpc` span carrying the method name and,
//! once finished, its duration. Payloads are only logged when explicitly
//! enabled because balances and addresses end up in them.

use std::{
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use futures::future::BoxFuture;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

/// Tower layer producing [`LoggingService`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingLayer {
    log_payloads: bool,
}

impl LoggingLayer {
    /// Log method, timing and errors only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log request and response payloads at trace level.
    pub fn with_payloads(mut self) -> Self {
        self.log_payloads = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            log_payloads: self.log_payloads,
        }
    }
}

/// Service wrapper that logs each RPC call.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    log_payloads: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
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
        let log_payloads = self.log_payloads;
        let mut service = self.service.clone();
        let method = method_label(&request);
        let span = tracing::debug_span!(
            "ethinfo.rpc",
            method = %method,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                if log_payloads {
                    trace!(request = ?request, "RPC request");
                }

                let start = Instant::now();
                let result = service.call(request).await;
                let elapsed_ms = start.elapsed().as_millis() as u64;
                tracing::Span::current().record("duration_ms", elapsed_ms);

                match &result {
                    Ok(response) if log_payloads => {
                        trace!(response = ?response, elapsed_ms, "RPC response")
                    }
                    Ok(_) => debug!(elapsed_ms, "RPC response"),
                    Err(error) => warn!(error = %error, elapsed_ms, "RPC call failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Method name of a request, or a summary for batches.
fn method_label(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}
