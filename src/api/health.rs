// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::TestResponse;
use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Upstream RPC status: "ok", "unavailable" or "not_configured".
    pub rpc: String,
    /// Indexing API status. Only present when an API key is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexer: Option<String>,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Check that the upstream RPC answers `eth_blockNumber`.
async fn check_rpc(state: &AppState) -> String {
    match state.rpc.as_deref() {
        Some(rpc) => match rpc.block_number().await {
            Ok(_) => "ok".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Readiness: RPC unavailable");
                "unavailable".to_string()
            }
        },
        None => "not_configured".to_string(),
    }
}

/// Connectivity check used by the frontend.
#[utoipa::path(
    get,
    path = "/test",
    tag = "Health",
    responses(
        (status = 200, description = "Backend is reachable", body = TestResponse)
    )
)]
pub async fn test_connection() -> Json<TestResponse> {
    tracing::info!("Test endpoint called");
    Json(TestResponse {
        message: "Backend is connected!".to_string(),
    })
}

/// Readiness probe handler.
///
/// Returns 200 only if the upstream RPC is configured and reachable.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Service is not ready", body = ReadyResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let rpc = check_rpc(&state).await;
    let indexer = state.glacier.as_ref().map(|_| "configured".to_string());

    let all_ok = rpc == "ok";

    let response = ReadyResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            rpc,
            indexer,
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
/// Does not check dependencies - use readiness for that.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
