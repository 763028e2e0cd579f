// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::DEFAULT_FRONTEND_URL,
    error::ErrorBody,
    models::{
        BlockInfo, BridgeToken, CrossChainResponse, CrossChainTransfer, DApp, LatestBlock,
        NetworkStats, Proposal, ProposalStatus, ProposalsResponse, TestResponse, TransactionInfo,
    },
    state::AppState,
};

pub mod blocks;
pub mod catalog;
pub mod community;
pub mod cross_chain;
pub mod health;
pub mod network;
pub mod transactions;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.frontend_origin);

    let routes = Router::new()
        .route("/test", get(health::test_connection))
        .route("/health", get(health::readiness))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/stats/network", get(network::network_stats))
        .route("/stats/blocks", get(blocks::latest_blocks))
        .route("/stats/blocks/latest", get(blocks::latest_block))
        .route("/stats/transactions", get(transactions::latest_transactions))
        .route("/stats/cross-chain", get(cross_chain::cross_chain_transfers))
        .route("/dapps", get(catalog::list_dapps))
        .route("/bridge/tokens", get(catalog::list_bridge_tokens))
        .route("/community/proposals", get(community::list_proposals))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

/// CORS policy admitting the configured frontend origin only.
fn cors_layer(origin: &str) -> CorsLayer {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
        tracing::warn!(origin, "Invalid frontend origin, falling back to default");
        HeaderValue::from_static(DEFAULT_FRONTEND_URL)
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::test_connection,
        health::liveness,
        health::readiness,
        network::network_stats,
        blocks::latest_blocks,
        blocks::latest_block,
        transactions::latest_transactions,
        cross_chain::cross_chain_transfers,
        catalog::list_dapps,
        catalog::list_bridge_tokens,
        community::list_proposals
    ),
    components(
        schemas(
            ErrorBody,
            TestResponse,
            NetworkStats,
            BlockInfo,
            LatestBlock,
            TransactionInfo,
            CrossChainTransfer,
            CrossChainResponse,
            DApp,
            BridgeToken,
            Proposal,
            ProposalStatus,
            ProposalsResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Connectivity and readiness"),
        (name = "Stats", description = "C-Chain network, block, transaction and bridge stats"),
        (name = "Catalog", description = "DApps and bridgeable tokens"),
        (name = "Community", description = "Governance proposals")
    )
)]
struct ApiDoc;

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::router;
    use crate::models::{BridgeToken, CrossChainTransfer, DApp, Proposal};
    use crate::placeholder::{DataSourceError, PlaceholderData};
    use crate::state::AppState;

    /// Drive one GET request through the full router.
    pub async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub struct FailingPlaceholders;

    #[async_trait]
    impl PlaceholderData for FailingPlaceholders {
        async fn dapps(&self) -> Result<Vec<DApp>, DataSourceError> {
            Err(DataSourceError::Unavailable("offline".to_string()))
        }

        async fn bridge_tokens(&self) -> Result<Vec<BridgeToken>, DataSourceError> {
            Err(DataSourceError::Unavailable("offline".to_string()))
        }

        async fn proposals(&self, _now: DateTime<Utc>) -> Result<Vec<Proposal>, DataSourceError> {
            Err(DataSourceError::Unavailable("offline".to_string()))
        }

        async fn cross_chain_transfers(
            &self,
            _now: DateTime<Utc>,
        ) -> Result<Vec<CrossChainTransfer>, DataSourceError> {
            Err(DataSourceError::Unavailable("offline".to_string()))
        }
    }
}
