// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DApp and bridge token catalogs.

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::{
    error::{ApiError, ErrorBody},
    models::{BridgeToken, DApp},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/dapps",
    tag = "Catalog",
    responses(
        (status = 200, description = "Known DApps", body = [DApp]),
        (status = 500, description = "Data source unavailable", body = ErrorBody)
    )
)]
pub async fn list_dapps(State(state): State<AppState>) -> Result<Json<Vec<DApp>>, ApiError> {
    info!("DApps endpoint called");

    state.placeholders.dapps().await.map(Json).map_err(|e| {
        error!(error = %e, "DApps error");
        ApiError::internal("Failed to fetch DApps")
    })
}

#[utoipa::path(
    get,
    path = "/bridge/tokens",
    tag = "Catalog",
    responses(
        (status = 200, description = "Bridgeable tokens", body = [BridgeToken]),
        (status = 500, description = "Data source unavailable", body = ErrorBody)
    )
)]
pub async fn list_bridge_tokens(
    State(state): State<AppState>,
) -> Result<Json<Vec<BridgeToken>>, ApiError> {
    info!("Bridge tokens endpoint called");

    state.placeholders.bridge_tokens().await.map(Json).map_err(|e| {
        error!(error = %e, "Bridge tokens error");
        ApiError::internal("Failed to fetch bridge tokens")
    })
}
