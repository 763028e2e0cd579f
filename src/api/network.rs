// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network summary endpoint.

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::{
    config::NetworkStatsSource,
    error::{ApiError, ErrorBody},
    models::NetworkStats,
    state::AppState,
    stats::{self, StatsError},
};

/// Get a summary of the C-Chain: head block, gas price, throughput and
/// active addresses.
///
/// In RPC mode the safe block (100 behind head) is folded into the
/// process-wide stats cache; in indexer mode Glacier metrics are passed
/// through.
#[utoipa::path(
    get,
    path = "/stats/network",
    tag = "Stats",
    responses(
        (status = 200, description = "Network stats", body = NetworkStats),
        (status = 500, description = "Upstream unavailable or not configured", body = ErrorBody)
    )
)]
pub async fn network_stats(State(state): State<AppState>) -> Result<Json<NetworkStats>, ApiError> {
    info!(source = ?state.config.network_stats_source, "Network stats endpoint called");

    let result = match state.config.network_stats_source {
        NetworkStatsSource::Rpc => match state.rpc.as_deref() {
            Some(rpc) => stats::network_stats_from_rpc(rpc, &state.stats).await,
            None => Err(StatsError::RpcNotConfigured),
        },
        NetworkStatsSource::Indexer => {
            stats::network_stats_from_indexer(state.glacier.as_deref(), state.config.chain_id)
                .await
        }
    };

    result.map(Json).map_err(|e| {
        error!(error = %e, "Network stats error");
        ApiError::internal("Failed to fetch network stats").with_details(e.to_string())
    })
}
