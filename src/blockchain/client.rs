// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Avalanche C-Chain client for read-only blockchain queries.

use std::{
    fmt::Display,
    future::IntoFuture,
    str::FromStr,
    time::Duration,
};

use alloy::{
    eips::BlockNumberOrTag,
    network::{ReceiptResponse, TransactionResponse},
    primitives::B256,
    providers::{DynProvider, Provider, ProviderBuilder},
};
use async_trait::async_trait;
use url::Url;

use super::types::*;

/// Read-only view of the upstream JSON-RPC node.
///
/// Handlers and the stats service only talk to the chain through this
/// trait, so tests can swap in an in-memory chain.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Current head block number.
    async fn block_number(&self) -> Result<u64, AvaxClientError>;

    /// Current gas price in wei.
    async fn gas_price(&self) -> Result<u128, AvaxClientError>;

    /// Block by number with its transaction hashes. `Ok(None)` if unknown.
    async fn block(&self, number: u64) -> Result<Option<BlockSummary>, AvaxClientError>;

    async fn transaction(&self, hash: &str) -> Result<Option<TransactionDetails>, AvaxClientError>;

    async fn receipt(&self, hash: &str) -> Result<Option<ReceiptSummary>, AvaxClientError>;
}

/// Avalanche C-Chain client backed by an alloy HTTP provider.
pub struct AvaxClient {
    provider: DynProvider,
    /// Upper bound for every single RPC call.
    timeout: Duration,
}

impl AvaxClient {
    /// Create a new client for the given RPC endpoint.
    pub fn new(rpc_url: Url, timeout: Duration) -> Self {
        let provider = ProviderBuilder::new().connect_http(rpc_url).erased();
        Self { provider, timeout }
    }

    /// Await an RPC call, bounded by the client timeout.
    async fn call<T, E, F>(&self, method: &'static str, request: F) -> Result<T, AvaxClientError>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: Display,
    {
        match tokio::time::timeout(self.timeout, request.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AvaxClientError::RpcError(format!("{method}: {e}"))),
            Err(_) => Err(AvaxClientError::Timeout {
                method,
                after: self.timeout,
            }),
        }
    }
}

#[async_trait]
impl ChainRpc for AvaxClient {
    async fn block_number(&self) -> Result<u64, AvaxClientError> {
        self.call("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    async fn gas_price(&self) -> Result<u128, AvaxClientError> {
        self.call("eth_gasPrice", self.provider.get_gas_price()).await
    }

    async fn block(&self, number: u64) -> Result<Option<BlockSummary>, AvaxClientError> {
        let block = self
            .call(
                "eth_getBlockByNumber",
                self.provider
                    .get_block_by_number(BlockNumberOrTag::Number(number)),
            )
            .await?;

        Ok(block.map(|block| BlockSummary {
            number: block.header.number,
            hash: block.header.hash.to_string(),
            timestamp: block.header.timestamp,
            transactions: block
                .transactions
                .hashes()
                .map(|hash| hash.to_string())
                .collect(),
        }))
    }

    async fn transaction(&self, hash: &str) -> Result<Option<TransactionDetails>, AvaxClientError> {
        let tx_hash = parse_hash(hash)?;
        let tx = self
            .call(
                "eth_getTransactionByHash",
                self.provider.get_transaction_by_hash(tx_hash),
            )
            .await?;

        Ok(tx.map(|tx| TransactionDetails {
            hash: tx.tx_hash().to_string(),
            from: TransactionResponse::from(&tx).to_checksum(None),
            to: alloy::consensus::Transaction::to(&tx).map(|to| to.to_checksum(None)),
            value: alloy::consensus::Transaction::value(&tx),
            block_number: TransactionResponse::block_number(&tx),
        }))
    }

    async fn receipt(&self, hash: &str) -> Result<Option<ReceiptSummary>, AvaxClientError> {
        let tx_hash = parse_hash(hash)?;
        let receipt = self
            .call(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash),
            )
            .await?;

        Ok(receipt.map(|receipt| ReceiptSummary {
            gas_used: ReceiptResponse::gas_used(&receipt),
            success: ReceiptResponse::status(&receipt),
        }))
    }
}

fn parse_hash(hash: &str) -> Result<B256, AvaxClientError> {
    B256::from_str(hash).map_err(|e| AvaxClientError::InvalidHash(format!("{hash}: {e}")))
}

/// Errors that can occur during blockchain queries.
#[derive(Debug, thiserror::Error)]
pub enum AvaxClientError {
    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("RPC call {method} timed out after {after:?}")]
    Timeout {
        method: &'static str,
        after: Duration,
    },
}
