// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-chain bridge activity endpoint.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{error, info};

use crate::{
    error::{ApiError, ErrorBody},
    models::CrossChainResponse,
    state::AppState,
    stats,
};

/// List recent bridge transfers into and out of the C-Chain.
///
/// Served from the Glacier indexing API when an API key is configured,
/// otherwise from placeholder data.
#[utoipa::path(
    get,
    path = "/stats/cross-chain",
    tag = "Stats",
    responses(
        (status = 200, description = "Bridge transfers", body = CrossChainResponse),
        (status = 500, description = "Indexing API unavailable", body = ErrorBody)
    )
)]
pub async fn cross_chain_transfers(
    State(state): State<AppState>,
) -> Result<Json<CrossChainResponse>, ApiError> {
    info!(indexer = state.glacier.is_some(), "Cross-chain endpoint called");

    stats::cross_chain_transfers(
        state.glacier.as_deref(),
        state.placeholders.as_ref(),
        state.config.chain_id,
        Utc::now(),
    )
    .await
    .map(|data| Json(CrossChainResponse { data }))
    .map_err(|e| {
        error!(error = %e, "Cross-chain error");
        ApiError::internal("Failed to fetch cross-chain transactions")
    })
}
