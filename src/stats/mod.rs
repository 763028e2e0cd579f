// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Chain Stats
//!
//! Fetch-transform logic behind the `/stats/*` endpoints.
//!
//! Every function issues its upstream calls concurrently. A required anchor
//! (the head block number, the safe block) aborts the request when it
//! fails; optional items (individual blocks, transactions) are dropped.

pub mod cache;
pub mod window;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    blockchain::{
        format_avax, format_gwei, safe_block_number, AvaxClientError, BlockSummary, ChainRpc,
    },
    fanout::gather_resolved,
    indexer::{GlacierClient, GlacierError},
    models::{BlockInfo, CrossChainTransfer, LatestBlock, NetworkStats, TransactionInfo},
    placeholder::{DataSourceError, PlaceholderData},
};

pub use cache::{
    BlockObservation, NetworkStatsSnapshot, StatsCache, StatsCacheError, StatsCacheHandle,
    StatsUpdate,
};

/// Approximate number of C-Chain blocks per day, used to extrapolate
/// daily transactions from a single block.
pub const BLOCKS_PER_DAY: u64 = 5256;

/// Blocks returned by `/stats/blocks`.
pub const LATEST_BLOCKS_COUNT: u64 = 5;

/// Blocks scanned by `/stats/transactions`.
pub const RECENT_TRANSACTION_BLOCKS: u64 = 5;

/// Transactions taken from each scanned block.
pub const TRANSACTIONS_PER_BLOCK: usize = 3;

/// Entries returned by `/stats/transactions`.
pub const LATEST_TRANSACTIONS_COUNT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("AVALANCHE_RPC not configured")]
    RpcNotConfigured,

    #[error("Indexing API not configured")]
    IndexerNotConfigured,

    #[error("Block {0} not found")]
    BlockNotFound(u64),

    #[error(transparent)]
    Rpc(#[from] AvaxClientError),

    #[error(transparent)]
    Indexer(#[from] GlacierError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Cache(#[from] StatsCacheError),
}

impl From<&NetworkStatsSnapshot> for NetworkStats {
    fn from(snapshot: &NetworkStatsSnapshot) -> Self {
        Self {
            block_number: snapshot.block_number,
            gas_price: snapshot.gas_price.clone(),
            tps: snapshot.tps,
            active_addresses: snapshot.active_addresses,
            total_transactions24h: snapshot.tps * BLOCKS_PER_DAY,
        }
    }
}

/// Network stats derived from the RPC node and folded into the stats cache.
///
/// Nothing is sent to the cache unless head, gas price and the safe block
/// were all fetched.
pub async fn network_stats_from_rpc(
    rpc: &dyn ChainRpc,
    cache: &StatsCacheHandle,
) -> Result<NetworkStats, StatsError> {
    let (head, gas_price) = tokio::try_join!(rpc.block_number(), rpc.gas_price())?;

    let safe = safe_block_number(head);
    let block = rpc.block(safe).await?.ok_or(StatsError::BlockNotFound(safe))?;

    let already_processed = cache
        .snapshot()
        .last_processed_block
        .is_some_and(|last| block.number <= last);
    let observation = if already_processed {
        None
    } else {
        Some(observe_block(rpc, &block).await)
    };

    let snapshot = cache
        .apply(StatsUpdate {
            head_block: head,
            gas_price: format_gwei(gas_price),
            observation,
            observed_at: Utc::now().timestamp(),
        })
        .await?;

    Ok(NetworkStats::from(&snapshot))
}

/// Resolve the senders and receivers of every transaction in `block`.
async fn observe_block(rpc: &dyn ChainRpc, block: &BlockSummary) -> BlockObservation {
    let transactions = gather_resolved(
        "transaction details",
        block
            .transactions
            .iter()
            .map(|hash| rpc.transaction(hash))
            .collect::<Vec<_>>(),
    )
    .await;

    let addresses: Vec<String> = transactions
        .into_iter()
        .flat_map(|tx| std::iter::once(tx.from).chain(tx.to))
        .collect();

    debug!(
        block = block.number,
        transactions = block.transactions.len(),
        addresses = addresses.len(),
        "Observed block"
    );

    BlockObservation {
        number: block.number,
        timestamp: block.timestamp,
        transaction_count: block.transactions.len() as u64,
        addresses,
    }
}

/// Network stats passed through from the indexing API.
pub async fn network_stats_from_indexer(
    glacier: Option<&GlacierClient>,
    chain_id: u64,
) -> Result<NetworkStats, StatsError> {
    let glacier = glacier.ok_or(StatsError::IndexerNotConfigured)?;
    Ok(glacier.network_metrics(chain_id).await?)
}

/// The `LATEST_BLOCKS_COUNT` blocks ending at the safe block, newest first.
///
/// Blocks that fail to resolve are left out.
pub async fn latest_blocks(rpc: &dyn ChainRpc) -> Result<Vec<BlockInfo>, StatsError> {
    let head = rpc.block_number().await?;
    let safe = safe_block_number(head);

    let numbers = (0..LATEST_BLOCKS_COUNT).filter_map(|i| safe.checked_sub(i));
    let blocks = gather_resolved("block", numbers.map(|number| rpc.block(number))).await;

    Ok(blocks
        .into_iter()
        .map(|block| BlockInfo {
            number: block.number,
            timestamp: block.timestamp,
            transactions: block.transactions.len(),
            hash: block.hash,
        })
        .collect())
}

/// The current head block with its transaction hashes.
pub async fn latest_block(rpc: &dyn ChainRpc) -> Result<LatestBlock, StatsError> {
    let head = rpc.block_number().await?;
    let block = rpc.block(head).await?.ok_or(StatsError::BlockNotFound(head))?;

    Ok(LatestBlock {
        number: block.number,
        hash: block.hash,
        timestamp: block.timestamp,
        transactions: block.transactions,
    })
}

/// Most recent transactions across the last few blocks, newest first.
pub async fn latest_transactions(rpc: &dyn ChainRpc) -> Result<Vec<TransactionInfo>, StatsError> {
    let head = rpc.block_number().await?;

    let numbers = (0..RECENT_TRANSACTION_BLOCKS).filter_map(|i| head.checked_sub(i));
    let blocks = gather_resolved("block", numbers.map(|number| rpc.block(number))).await;

    let lookups = blocks.iter().flat_map(|block| {
        block
            .transactions
            .iter()
            .take(TRANSACTIONS_PER_BLOCK)
            .map(move |hash| transaction_info(rpc, hash, block.timestamp))
    })
    .collect::<Vec<_>>();
    let mut transactions = gather_resolved("transaction", lookups).await;

    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    transactions.truncate(LATEST_TRANSACTIONS_COUNT);
    Ok(transactions)
}

async fn transaction_info(
    rpc: &dyn ChainRpc,
    hash: &str,
    timestamp: u64,
) -> Result<Option<TransactionInfo>, AvaxClientError> {
    let (tx, receipt) = tokio::join!(rpc.transaction(hash), rpc.receipt(hash));

    let Some(tx) = tx? else {
        return Ok(None);
    };
    let receipt = receipt.unwrap_or_else(|e| {
        warn!(tx_hash = %hash, error = %e, "Failed to fetch receipt");
        None
    });

    Ok(Some(TransactionInfo {
        hash: tx.hash,
        from: tx.from,
        to: tx.to,
        value: format_avax(tx.value),
        timestamp,
        block_number: tx.block_number,
        gas_used: receipt
            .map(|r| r.gas_used.to_string())
            .unwrap_or_else(|| "0".to_string()),
        status: receipt.is_some_and(|r| r.success),
    }))
}

/// Bridge transfers from the indexing API, or placeholder data without one.
pub async fn cross_chain_transfers(
    glacier: Option<&GlacierClient>,
    placeholders: &dyn PlaceholderData,
    chain_id: u64,
    now: DateTime<Utc>,
) -> Result<Vec<CrossChainTransfer>, StatsError> {
    match glacier {
        Some(glacier) => Ok(glacier.bridge_transfers(chain_id).await?),
        None => Ok(placeholders.cross_chain_transfers(now).await?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::mock::{MockRpc, UnreachableRpc, RECEIVER};
    use crate::placeholder::StaticPlaceholders;
    use tokio_util::sync::CancellationToken;

    fn spawn_cache() -> (StatsCacheHandle, CancellationToken) {
        let shutdown = CancellationToken::new();
        (StatsCache::default().spawn(shutdown.clone()), shutdown)
    }

    #[tokio::test]
    async fn latest_blocks_reads_five_blocks_behind_the_safe_offset() {
        let mut rpc = MockRpc::with_head(1000);
        for number in 896..=900 {
            rpc.push_block(number, 10_000 + number, &["0x01"]);
        }
        rpc.blocks.remove(&898);
        rpc.failing_blocks.insert(897);

        let blocks = latest_blocks(&rpc).await.unwrap();

        assert_eq!(rpc.requested_blocks().len(), 5);
        let mut requested = rpc.requested_blocks();
        requested.sort_unstable();
        assert_eq!(requested, vec![896, 897, 898, 899, 900]);

        let numbers: Vec<u64> = blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![900, 899, 896]);
        for block in &blocks {
            assert!(!block.hash.is_empty());
            assert_eq!(block.transactions, 1);
        }
    }

    #[tokio::test]
    async fn latest_blocks_near_genesis_does_not_underflow() {
        let mut rpc = MockRpc::with_head(102);
        for number in 0..=2 {
            rpc.push_block(number, number, &[]);
        }
        let blocks = latest_blocks(&rpc).await.unwrap();
        let numbers: Vec<u64> = blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![2, 1, 0]);
    }

    #[tokio::test]
    async fn latest_block_returns_head_with_hashes() {
        let mut rpc = MockRpc::with_head(50);
        rpc.push_block(50, 1_234, &["0x01", "0x02"]);

        let block = latest_block(&rpc).await.unwrap();
        assert_eq!(block.number, 50);
        assert_eq!(block.timestamp, 1_234);
        assert_eq!(block.transactions.len(), 2);
    }

    #[tokio::test]
    async fn latest_block_missing_head_is_an_error() {
        let rpc = MockRpc::with_head(50);
        let err = latest_block(&rpc).await.unwrap_err();
        assert!(matches!(err, StatsError::BlockNotFound(50)));
    }

    #[tokio::test]
    async fn latest_transactions_are_sorted_and_capped() {
        let mut rpc = MockRpc::with_head(200);
        for (i, number) in (196..=200).enumerate() {
            rpc.push_block(number, 1_000 + i as u64, &["0x01", "0x02", "0x03", "0x04"]);
        }

        let transactions = latest_transactions(&rpc).await.unwrap();

        assert_eq!(transactions.len(), LATEST_TRANSACTIONS_COUNT);
        assert!(transactions
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
        assert_eq!(transactions[0].timestamp, 1_004);
        assert_eq!(transactions[0].block_number, Some(200));
        assert_eq!(transactions[0].value, "1.0");
        assert_eq!(transactions[0].gas_used, "21000");
        assert!(transactions[0].status);
        assert_eq!(transactions[0].to.as_deref(), Some(RECEIVER));
    }

    #[tokio::test]
    async fn latest_transactions_drop_unresolved_entries() {
        let mut rpc = MockRpc::with_head(10);
        rpc.push_block(10, 100, &["0x01", "0x02", "0x03"]);
        let hashes = rpc.blocks[&10].transactions.clone();
        rpc.failing_transactions.insert(hashes[0].clone());
        rpc.transactions.remove(&hashes[1]);
        rpc.receipts.remove(&hashes[2]);

        let transactions = latest_transactions(&rpc).await.unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].hash, hashes[2]);
        assert_eq!(transactions[0].gas_used, "0");
        assert!(!transactions[0].status);
    }

    #[tokio::test]
    async fn network_stats_fold_the_safe_block_into_the_cache() {
        let (cache, shutdown) = spawn_cache();
        let mut rpc = MockRpc::with_head(1000);
        rpc.push_block(900, 5_000, &["0x01", "0x02", "0x01"]);

        let stats = network_stats_from_rpc(&rpc, &cache).await.unwrap();

        assert_eq!(stats.block_number, 1000);
        assert_eq!(stats.gas_price, "25.0");
        assert_eq!(stats.tps, 3);
        // 0x01, 0x02 and the shared receiver.
        assert_eq!(stats.active_addresses, 3);
        assert_eq!(stats.total_transactions24h, 3 * BLOCKS_PER_DAY);
        assert_eq!(cache.snapshot().last_processed_block, Some(900));

        shutdown.cancel();
    }

    #[tokio::test]
    async fn network_stats_skip_transaction_lookups_for_a_processed_block() {
        let (cache, shutdown) = spawn_cache();
        let mut rpc = MockRpc::with_head(1000);
        rpc.push_block(900, 5_000, &["0x01"]);
        network_stats_from_rpc(&rpc, &cache).await.unwrap();

        // Same safe block again, now with its transaction unresolvable.
        let hash = rpc.blocks[&900].transactions[0].clone();
        rpc.failing_transactions.insert(hash);
        let stats = network_stats_from_rpc(&rpc, &cache).await.unwrap();

        assert_eq!(stats.tps, 1);
        assert_eq!(stats.active_addresses, 2);

        shutdown.cancel();
    }

    #[tokio::test]
    async fn lagging_node_neither_rewinds_stats_nor_fetches_old_transactions() {
        let (cache, shutdown) = spawn_cache();
        let mut ahead = MockRpc::with_head(1010);
        ahead.push_block(910, 5_020, &["0x01", "0x02"]);
        network_stats_from_rpc(&ahead, &cache).await.unwrap();

        let mut behind = MockRpc::with_head(1005);
        behind.gas_price = 30_000_000_000;
        behind.push_block(905, 5_010, &["0x03"]);
        let stats = network_stats_from_rpc(&behind, &cache).await.unwrap();

        assert!(behind.requested_transactions().is_empty());
        assert_eq!(stats.block_number, 1010);
        assert_eq!(stats.gas_price, "25.0");
        assert_eq!(stats.tps, 2);
        assert_eq!(cache.snapshot().last_processed_block, Some(910));

        shutdown.cancel();
    }

    #[tokio::test]
    async fn failed_transaction_lookups_are_skipped() {
        let (cache, shutdown) = spawn_cache();
        let mut rpc = MockRpc::with_head(1000);
        rpc.push_block(900, 5_000, &["0x01", "0x02"]);
        let hash = rpc.blocks[&900].transactions[0].clone();
        rpc.failing_transactions.insert(hash);

        let stats = network_stats_from_rpc(&rpc, &cache).await.unwrap();

        assert_eq!(stats.tps, 2);
        assert_eq!(stats.active_addresses, 2);

        shutdown.cancel();
    }

    #[tokio::test]
    async fn missing_safe_block_leaves_the_cache_untouched() {
        let (cache, shutdown) = spawn_cache();
        let rpc = MockRpc::with_head(1000);

        let err = network_stats_from_rpc(&rpc, &cache).await.unwrap_err();

        assert!(matches!(err, StatsError::BlockNotFound(900)));
        assert_eq!(cache.snapshot(), NetworkStatsSnapshot::default());

        shutdown.cancel();
    }

    #[tokio::test]
    async fn unreachable_rpc_fails_every_rpc_endpoint() {
        let (cache, shutdown) = spawn_cache();

        assert!(network_stats_from_rpc(&UnreachableRpc, &cache).await.is_err());
        assert!(latest_blocks(&UnreachableRpc).await.is_err());
        assert!(latest_block(&UnreachableRpc).await.is_err());
        assert!(latest_transactions(&UnreachableRpc).await.is_err());
        assert_eq!(cache.snapshot(), NetworkStatsSnapshot::default());

        shutdown.cancel();
    }

    #[tokio::test]
    async fn indexer_mode_requires_a_client() {
        let err = network_stats_from_indexer(None, 43114).await.unwrap_err();
        assert!(matches!(err, StatsError::IndexerNotConfigured));
    }

    #[tokio::test]
    async fn cross_chain_falls_back_to_placeholders() {
        let transfers = cross_chain_transfers(None, &StaticPlaceholders, 43114, Utc::now())
            .await
            .unwrap();
        assert_eq!(transfers.len(), 5);
        assert!(transfers.iter().all(|t| t.destination_chain == "Avalanche"));
    }
}
