// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Governance proposals endpoint.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{error, info};

use crate::{
    error::{ApiError, ErrorBody},
    models::ProposalsResponse,
    state::AppState,
};

/// List Avalanche Community Proposals with their voting status.
///
/// Voting deadlines are recomputed on every request.
#[utoipa::path(
    get,
    path = "/community/proposals",
    tag = "Community",
    responses(
        (status = 200, description = "Proposals", body = ProposalsResponse),
        (status = 500, description = "Data source unavailable", body = ErrorBody)
    )
)]
pub async fn list_proposals(
    State(state): State<AppState>,
) -> Result<Json<ProposalsResponse>, ApiError> {
    info!("Community proposals endpoint called");

    let now = Utc::now();
    let proposals = state.placeholders.proposals(now).await.map_err(|e| {
        error!(error = %e, "Proposals error");
        ApiError::internal("Failed to fetch proposals")
    })?;

    Ok(Json(ProposalsResponse::new(proposals, now.timestamp())))
}
