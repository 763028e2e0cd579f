// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Recent transactions endpoint.

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::{
    error::{ApiError, ErrorBody},
    models::TransactionInfo,
    state::AppState,
    stats::{self, StatsError},
};

/// List up to ten recent transactions, newest first.
///
/// Samples the first three transactions of each of the last five blocks.
/// Transactions that cannot be resolved are omitted.
#[utoipa::path(
    get,
    path = "/stats/transactions",
    tag = "Stats",
    responses(
        (status = 200, description = "Recent transactions", body = [TransactionInfo]),
        (status = 500, description = "Upstream unavailable or not configured", body = ErrorBody)
    )
)]
pub async fn latest_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionInfo>>, ApiError> {
    info!("Latest transactions endpoint called");

    let result = match state.rpc.as_deref() {
        Some(rpc) => stats::latest_transactions(rpc).await,
        None => Err(StatsError::RpcNotConfigured),
    };

    result.map(Json).map_err(|e| {
        error!(error = %e, "Latest transactions error");
        ApiError::internal("Failed to fetch latest transactions")
    })
}
