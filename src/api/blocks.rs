// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Recent block endpoints.

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::{
    error::{ApiError, ErrorBody},
    models::{BlockInfo, LatestBlock},
    state::AppState,
    stats::{self, StatsError},
};

/// List the five blocks ending at the safe block (head - 100), newest first.
///
/// Blocks the node could not return are omitted, so fewer than five entries
/// is a valid response.
#[utoipa::path(
    get,
    path = "/stats/blocks",
    tag = "Stats",
    responses(
        (status = 200, description = "Recent blocks", body = [BlockInfo]),
        (status = 500, description = "Upstream unavailable or not configured", body = ErrorBody)
    )
)]
pub async fn latest_blocks(State(state): State<AppState>) -> Result<Json<Vec<BlockInfo>>, ApiError> {
    info!("Latest blocks endpoint called");

    let result = match state.rpc.as_deref() {
        Some(rpc) => stats::latest_blocks(rpc).await,
        None => Err(StatsError::RpcNotConfigured),
    };

    result.map(Json).map_err(|e| {
        error!(error = %e, "Latest blocks error");
        ApiError::internal("Failed to fetch latest blocks")
    })
}

/// Get the head block with its transaction hashes.
#[utoipa::path(
    get,
    path = "/stats/blocks/latest",
    tag = "Stats",
    responses(
        (status = 200, description = "Head block", body = LatestBlock),
        (status = 500, description = "Upstream unavailable or not configured", body = ErrorBody)
    )
)]
pub async fn latest_block(State(state): State<AppState>) -> Result<Json<LatestBlock>, ApiError> {
    info!("Latest block endpoint called");

    let result = match state.rpc.as_deref() {
        Some(rpc) => stats::latest_block(rpc).await,
        None => Err(StatsError::RpcNotConfigured),
    };

    result.map(Json).map_err(|e| {
        error!(error = %e, "Latest block error");
        ApiError::internal("Failed to fetch latest block")
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tokio_util::sync::CancellationToken;

    use crate::api::test_support::get_json;
    use crate::blockchain::mock::{MockRpc, UnreachableRpc};
    use crate::state::AppState;

    #[tokio::test]
    async fn head_1000_serves_blocks_900_to_896() {
        let shutdown = CancellationToken::new();
        let mut rpc = MockRpc::with_head(1000);
        for number in 896..=900 {
            rpc.push_block(number, 20_000 + number, &["0x01", "0x02"]);
        }
        rpc.failing_blocks.insert(898);
        let state = AppState::offline(shutdown.clone()).with_rpc(Arc::new(rpc));

        let (status, body) = get_json(state, "/stats/blocks").await;

        assert_eq!(status, StatusCode::OK);
        let blocks = body.as_array().unwrap();
        assert_eq!(blocks.len(), 4);
        let numbers: Vec<u64> = blocks.iter().map(|b| b["number"].as_u64().unwrap()).collect();
        assert_eq!(numbers, vec![900, 899, 897, 896]);
        for block in blocks {
            assert!(block["timestamp"].is_u64());
            assert!(!block["hash"].as_str().unwrap().is_empty());
            assert_eq!(block["transactions"], 2);
        }

        shutdown.cancel();
    }

    #[tokio::test]
    async fn unreachable_rpc_is_a_500() {
        let shutdown = CancellationToken::new();
        let state = AppState::offline(shutdown.clone()).with_rpc(Arc::new(UnreachableRpc));

        let (status, body) = get_json(state.clone(), "/stats/blocks").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch latest blocks");
        assert!(body.get("details").is_none());

        let (status, body) = get_json(state, "/stats/blocks/latest").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch latest block");

        shutdown.cancel();
    }

    #[tokio::test]
    async fn missing_rpc_config_is_a_500() {
        let shutdown = CancellationToken::new();
        let state = AppState::offline(shutdown.clone());

        let (status, body) = get_json(state.clone(), "/stats/blocks").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch latest blocks");

        let (status, body) = get_json(state, "/stats/blocks/latest").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch latest block");

        shutdown.cancel();
    }

    #[tokio::test]
    async fn latest_block_lists_transaction_hashes() {
        let shutdown = CancellationToken::new();
        let mut rpc = MockRpc::with_head(77);
        rpc.push_block(77, 9_999, &["0x01"]);
        let expected_hash = rpc.blocks[&77].transactions[0].clone();
        let state = AppState::offline(shutdown.clone()).with_rpc(Arc::new(rpc));

        let (status, body) = get_json(state, "/stats/blocks/latest").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["number"], 77);
        assert_eq!(body["timestamp"], 9_999);
        assert_eq!(body["transactions"][0], expected_hash.as_str());

        shutdown.cancel();
    }
}
