// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory chain used by handler and service tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use alloy::primitives::U256;
use async_trait::async_trait;

use super::{AvaxClientError, BlockSummary, ChainRpc, ReceiptSummary, TransactionDetails};

#[derive(Default)]
pub struct MockRpc {
    pub head: u64,
    pub gas_price: u128,
    pub blocks: HashMap<u64, BlockSummary>,
    pub transactions: HashMap<String, TransactionDetails>,
    pub receipts: HashMap<String, ReceiptSummary>,
    /// Block numbers whose lookup fails with an RPC error.
    pub failing_blocks: HashSet<u64>,
    /// Transaction hashes whose lookup fails with an RPC error.
    pub failing_transactions: HashSet<String>,
    /// Every block number requested, in call order.
    pub requested_blocks: Mutex<Vec<u64>>,
    /// Every transaction hash requested, in call order.
    pub requested_transactions: Mutex<Vec<String>>,
}

impl MockRpc {
    pub fn with_head(head: u64) -> Self {
        Self {
            head,
            gas_price: 25_000_000_000,
            ..Default::default()
        }
    }

    /// Insert a block whose transactions are generated from `senders`.
    ///
    /// Each sender produces one transaction worth 1 AVAX sent to a fixed
    /// receiver, with a successful receipt.
    pub fn push_block(&mut self, number: u64, timestamp: u64, senders: &[&str]) {
        let mut hashes = Vec::new();
        for (i, from) in senders.iter().enumerate() {
            let hash = format!("0x{number:032x}{i:032x}");
            self.transactions.insert(
                hash.clone(),
                TransactionDetails {
                    hash: hash.clone(),
                    from: from.to_string(),
                    to: Some(RECEIVER.to_string()),
                    value: U256::from(1_000_000_000_000_000_000u64),
                    block_number: Some(number),
                },
            );
            self.receipts.insert(
                hash.clone(),
                ReceiptSummary {
                    gas_used: 21_000,
                    success: true,
                },
            );
            hashes.push(hash);
        }
        self.blocks.insert(
            number,
            BlockSummary {
                number,
                hash: format!("0x{number:064x}"),
                timestamp,
                transactions: hashes,
            },
        );
    }

    pub fn requested_blocks(&self) -> Vec<u64> {
        self.requested_blocks.lock().unwrap().clone()
    }

    pub fn requested_transactions(&self) -> Vec<String> {
        self.requested_transactions.lock().unwrap().clone()
    }
}

pub const RECEIVER: &str = "0x00000000000000000000000000000000000000Aa";

#[async_trait]
impl ChainRpc for MockRpc {
    async fn block_number(&self) -> Result<u64, AvaxClientError> {
        Ok(self.head)
    }

    async fn gas_price(&self) -> Result<u128, AvaxClientError> {
        Ok(self.gas_price)
    }

    async fn block(&self, number: u64) -> Result<Option<BlockSummary>, AvaxClientError> {
        self.requested_blocks.lock().unwrap().push(number);
        if self.failing_blocks.contains(&number) {
            return Err(AvaxClientError::RpcError(format!("block {number} failed")));
        }
        Ok(self.blocks.get(&number).cloned())
    }

    async fn transaction(&self, hash: &str) -> Result<Option<TransactionDetails>, AvaxClientError> {
        self.requested_transactions
            .lock()
            .unwrap()
            .push(hash.to_string());
        if self.failing_transactions.contains(hash) {
            return Err(AvaxClientError::RpcError(format!("tx {hash} failed")));
        }
        Ok(self.transactions.get(hash).cloned())
    }

    async fn receipt(&self, hash: &str) -> Result<Option<ReceiptSummary>, AvaxClientError> {
        Ok(self.receipts.get(hash).copied())
    }
}

/// Chain whose every call fails, as if the node were unreachable.
pub struct UnreachableRpc;

#[async_trait]
impl ChainRpc for UnreachableRpc {
    async fn block_number(&self) -> Result<u64, AvaxClientError> {
        Err(AvaxClientError::RpcError("connection refused".to_string()))
    }

    async fn gas_price(&self) -> Result<u128, AvaxClientError> {
        Err(AvaxClientError::RpcError("connection refused".to_string()))
    }

    async fn block(&self, _number: u64) -> Result<Option<BlockSummary>, AvaxClientError> {
        Err(AvaxClientError::RpcError("connection refused".to_string()))
    }

    async fn transaction(&self, _hash: &str) -> Result<Option<TransactionDetails>, AvaxClientError> {
        Err(AvaxClientError::RpcError("connection refused".to_string()))
    }

    async fn receipt(&self, _hash: &str) -> Result<Option<ReceiptSummary>, AvaxClientError> {
        Err(AvaxClientError::RpcError("connection refused".to_string()))
    }
}
