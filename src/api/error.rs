// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Mapping of request failures onto the two public error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::errors::{AddressError, LookupError};

/// Body of every 400 response.
pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid Ethereum address";

/// Body of every 500 response.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching Ethereum data";

/// A failed `/eth-info` request.
///
/// Clients only ever see one of two fixed messages. The underlying cause is
/// logged when the response is built and never leaves the process.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The path parameter is not a valid address.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The path parameter could not be extracted at all.
    #[error("Malformed path parameter: {0}")]
    MalformedPath(String),

    /// The lookup failed after validation.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidAddress(_) | ApiError::MalformedPath(_) => {
                debug!(reason = %self, "Rejected address");
                (StatusCode::BAD_REQUEST, INVALID_ADDRESS_MESSAGE)
            }
            ApiError::Lookup(err) => {
                match err.deadline() {
                    Some(deadline) => error!(
                        stage = err.stage(),
                        deadline = deadline.kind(),
                        error = %err,
                        "Error fetching Ethereum data"
                    ),
                    None => error!(
                        stage = err.stage(),
                        error = %err,
                        details = ?err,
                        "Error fetching Ethereum data"
                    ),
                }
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
