// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Placeholder Data
//!
//! DApps, bridge tokens, governance proposals and the cross-chain fallback
//! have no live source yet. Handlers read them through [`PlaceholderData`]
//! so a real provider can be plugged into [`AppState`](crate::state::AppState)
//! without touching the HTTP layer.

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

use crate::models::{BridgeToken, CrossChainTransfer, DApp, Proposal, ProposalStatus};

const ACP_BASE_URL: &str = "https://github.com/avalanche-foundation/ACPs/tree/main/ACPs";

/// Number of synthetic transfers returned by the cross-chain fallback.
const FALLBACK_TRANSFER_COUNT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Source for the catalog, community and cross-chain fallback endpoints.
#[async_trait]
pub trait PlaceholderData: Send + Sync {
    async fn dapps(&self) -> Result<Vec<DApp>, DataSourceError>;

    async fn bridge_tokens(&self) -> Result<Vec<BridgeToken>, DataSourceError>;

    /// Proposals as of `now`; voting deadlines are relative to it.
    async fn proposals(&self, now: DateTime<Utc>) -> Result<Vec<Proposal>, DataSourceError>;

    /// Bridge transfers used when no indexing API is configured.
    async fn cross_chain_transfers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<CrossChainTransfer>, DataSourceError>;
}

/// Built-in static data set.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticPlaceholders;

#[async_trait]
impl PlaceholderData for StaticPlaceholders {
    async fn dapps(&self) -> Result<Vec<DApp>, DataSourceError> {
        Ok(vec![DApp {
            id: "1".to_string(),
            name: "Trader Joe".to_string(),
            category: "DEX".to_string(),
            description: "Leading DEX on Avalanche".to_string(),
            url: "https://traderjoexyz.com".to_string(),
            tvl: 100_000_000,
            volume24h: 5_000_000,
            users24h: 10_000,
        }])
    }

    async fn bridge_tokens(&self) -> Result<Vec<BridgeToken>, DataSourceError> {
        Ok(vec![BridgeToken {
            address: "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7".to_string(),
            symbol: "WAVAX".to_string(),
            name: "Wrapped AVAX".to_string(),
            decimals: 18,
            chain_id: 43114,
            logo_url: "/tokens/avax.png".to_string(),
        }])
    }

    async fn proposals(&self, now: DateTime<Utc>) -> Result<Vec<Proposal>, DataSourceError> {
        // (id, title, description, days until voting ends, for, against, proposer)
        let entries: [(&str, &str, &str, i64, u64, u64, &str); 5] = [
            (
                "ACP-151",
                "Use current block P-Chain height as context",
                "Proposal to use the current P-Chain block height as context for various chain operations",
                14,
                12_567,
                234,
                "avalanchefoundation",
            ),
            (
                "ACP-131",
                "Cancun EIPs",
                "Implementation of Ethereum Cancun upgrade EIPs on Avalanche C-Chain",
                10,
                15_890,
                445,
                "avaplatform",
            ),
            (
                "ACP-125",
                "Basefee Reduction",
                "Proposal to implement dynamic base fee reduction mechanism",
                12,
                8_234,
                123,
                "avalabs",
            ),
            (
                "ACP-118",
                "Warp Signature Request",
                "Implementation of signature request mechanism for Avalanche Warp Messaging",
                8,
                9_567,
                321,
                "avalanchefoundation",
            ),
            (
                "ACP-113",
                "Provable Randomness",
                "Implementation of verifiable random function (VRF) for secure randomness",
                15,
                11_234,
                567,
                "avaplatform",
            ),
        ];

        Ok(entries
            .into_iter()
            .map(
                |(id, title, description, days, votes_for, votes_against, proposer)| Proposal {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    status: ProposalStatus::Active,
                    voting_ends: (now + Duration::days(days))
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                    votes_for,
                    votes_against,
                    proposer: proposer.to_string(),
                    link: ACP_BASE_URL.to_string(),
                },
            )
            .collect())
    }

    async fn cross_chain_transfers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<CrossChainTransfer>, DataSourceError> {
        let mut rng = rand::thread_rng();
        let transfers = (0..FALLBACK_TRANSFER_COUNT)
            .map(|_| {
                let source_chain = if rng.gen_bool(0.5) { "Ethereum" } else { "BSC" };
                let hash_bytes: [u8; 32] = rng.gen();
                CrossChainTransfer {
                    source_chain: source_chain.to_string(),
                    destination_chain: "Avalanche".to_string(),
                    hash: format!("0x{}", alloy::hex::encode(hash_bytes)),
                    timestamp: now.timestamp() - rng.gen_range(0..3600),
                    amount: "0".to_string(),
                    token: "AVAX".to_string(),
                    status: "Completed".to_string(),
                    kind: "Bridge".to_string(),
                }
            })
            .collect();
        Ok(transfers)
    }
}
