// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{ApiError, AppState};
use crate::address::parse_address;
use crate::lookup::EthInfo;

/// `GET /eth-info/:address`
pub(super) async fn eth_info(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<EthInfo>, ApiError> {
    let Path(raw) = path.map_err(|rejection| ApiError::MalformedPath(rejection.body_text()))?;
    let address = parse_address(&raw)?;

    let deadline = state.request_deadline();
    let info = state.lookup().lookup(address, &deadline).await?;
    Ok(Json(info))
}

/// `GET /health`
pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
