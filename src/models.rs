// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the response data structures returned by the REST
//! API. All types derive `Serialize`, `Deserialize`, and `ToSchema` for
//! JSON handling and OpenAPI documentation. Field names are camelCase on
//! the wire.
//!
//! ## Model Categories
//!
//! - **Chain stats**: network summary, blocks, transactions
//! - **Cross-chain**: bridge transfers
//! - **Catalog**: DApps and bridge tokens
//! - **Community**: governance proposals

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Connectivity check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TestResponse {
    pub message: String,
}

// =============================================================================
// Chain Stats Models
// =============================================================================

/// Network summary returned by `/stats/network`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    /// Current head block number.
    pub block_number: u64,
    /// Gas price in gwei, as a decimal string.
    pub gas_price: String,
    /// Transactions observed per block (or per second in indexer mode).
    pub tps: u64,
    /// Distinct addresses seen in the last 24 hours.
    pub active_addresses: u64,
    /// Estimated transactions over the last 24 hours.
    pub total_transactions24h: u64,
}

/// Compact block entry returned by `/stats/blocks`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BlockInfo {
    pub number: u64,
    /// Unix seconds.
    pub timestamp: u64,
    /// Number of transactions in the block.
    pub transactions: usize,
    pub hash: String,
}

/// Head block returned by `/stats/blocks/latest`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LatestBlock {
    pub number: u64,
    pub hash: String,
    pub timestamp: u64,
    /// Transaction hashes in block order.
    pub transactions: Vec<String>,
}

/// Transaction entry returned by `/stats/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub hash: String,
    pub from: String,
    /// `null` for contract creations.
    pub to: Option<String>,
    /// Value in AVAX.
    pub value: String,
    /// Timestamp of the containing block.
    pub timestamp: u64,
    pub block_number: Option<u64>,
    pub gas_used: String,
    /// Whether the receipt reports success.
    pub status: bool,
}

// =============================================================================
// Cross-Chain Models
// =============================================================================

/// A bridge transfer between chains.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainTransfer {
    pub source_chain: String,
    pub destination_chain: String,
    pub hash: String,
    /// Unix seconds.
    pub timestamp: i64,
    pub amount: String,
    pub token: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CrossChainResponse {
    pub data: Vec<CrossChainTransfer>,
}

// =============================================================================
// Catalog Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DApp {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub url: String,
    /// Total value locked, USD.
    pub tvl: u64,
    pub volume24h: u64,
    pub users24h: u64,
}

/// Token that can be bridged to the C-Chain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BridgeToken {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub chain_id: u64,
    pub logo_url: String,
}

// =============================================================================
// Community Models
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum ProposalStatus {
    Active,
    Closed,
}

/// A governance proposal (ACP).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ProposalStatus,
    /// RFC 3339 timestamp.
    pub voting_ends: String,
    pub votes_for: u64,
    pub votes_against: u64,
    pub proposer: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalsResponse {
    /// Number of proposals with `Active` status.
    pub total_active: usize,
    pub proposals: Vec<Proposal>,
    /// Unix seconds.
    pub last_updated: i64,
}

impl ProposalsResponse {
    pub fn new(proposals: Vec<Proposal>, last_updated: i64) -> Self {
        let total_active = proposals
            .iter()
            .filter(|p| p.status == ProposalStatus::Active)
            .count();
        Self {
            total_active,
            proposals,
            last_updated,
        }
    }
}
