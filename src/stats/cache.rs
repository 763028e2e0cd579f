// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Network Stats Cache
//!
//! Process-wide rolling network stats, owned by a single background task.
//!
//! Request handlers never mutate the cache directly. They send a
//! [`StatsUpdate`] through a [`StatsCacheHandle`]; the owner task applies
//! updates one at a time and publishes a complete [`NetworkStatsSnapshot`]
//! after each one. Readers clone the latest published snapshot, so they
//! never observe a half-applied update.
//!
//! ## Shutdown
//!
//! The owner task stops when the cancellation token fires or when every
//! handle has been dropped. Later updates fail with
//! [`StatsCacheError::Closed`]; reads keep returning the last snapshot.

use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::window::ActiveAddressWindow;

/// Queue depth of pending updates before senders wait.
const COMMAND_BUFFER: usize = 64;

/// Per-chain transaction counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainMetrics {
    /// C-Chain transactions observed by this process.
    pub c: u64,
    pub p: u64,
    pub x: u64,
}

/// Immutable view of the cache after the last applied update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkStatsSnapshot {
    /// Transaction count of the last processed block.
    pub tps: u64,
    /// Head block number reported by the last update.
    pub block_number: u64,
    /// Gas price in gwei.
    pub gas_price: String,
    pub active_addresses: u64,
    /// Unix seconds of the last applied update, 0 before the first one.
    pub last_updated: i64,
    pub chain_metrics: ChainMetrics,
    /// Safe block whose transactions were last folded into the stats.
    pub last_processed_block: Option<u64>,
}

impl Default for NetworkStatsSnapshot {
    fn default() -> Self {
        Self {
            tps: 0,
            block_number: 0,
            gas_price: "0".to_string(),
            active_addresses: 0,
            last_updated: 0,
            chain_metrics: ChainMetrics::default(),
            last_processed_block: None,
        }
    }
}

/// What a request learned from a newly seen block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockObservation {
    pub number: u64,
    /// Block timestamp, unix seconds.
    pub timestamp: u64,
    pub transaction_count: u64,
    /// Senders and receivers of the transactions that could be resolved.
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsUpdate {
    pub head_block: u64,
    pub gas_price: String,
    /// `None` when the safe block was already processed.
    pub observation: Option<BlockObservation>,
    /// Unix seconds at which the update was assembled.
    pub observed_at: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum StatsCacheError {
    #[error("Stats cache task is not running")]
    Closed,
}

enum Command {
    Apply {
        update: StatsUpdate,
        reply: oneshot::Sender<NetworkStatsSnapshot>,
    },
}

/// State owned by the cache task.
#[derive(Debug, Default)]
pub struct StatsCache {
    snapshot: NetworkStatsSnapshot,
    window: ActiveAddressWindow,
}

impl StatsCache {
    /// Spawn the owner task and return a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self, shutdown: CancellationToken) -> StatsCacheHandle {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let (publisher, snapshots) = watch::channel(self.snapshot.clone());
        tokio::spawn(self.run(receiver, publisher, shutdown));
        StatsCacheHandle {
            commands,
            snapshots,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        publisher: watch::Sender<NetworkStatsSnapshot>,
        shutdown: CancellationToken,
    ) {
        info!("Network stats cache starting");

        loop {
            let command = tokio::select! {
                _ = shutdown.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => command,
                    None => break,
                },
            };

            match command {
                Command::Apply { update, reply } => {
                    let snapshot = self.apply(update);
                    publisher.send_replace(snapshot.clone());
                    // The requester may have gone away; the update stands.
                    let _ = reply.send(snapshot);
                }
            }
        }

        info!("Network stats cache shutting down");
    }

    /// Fold one update into the cache and return the new snapshot.
    ///
    /// Head and gas price are only taken from updates whose head is at or
    /// above the cached one, and observations of a block at or below the
    /// last processed one are ignored, so a late update never rewinds the
    /// stats.
    pub fn apply(&mut self, update: StatsUpdate) -> NetworkStatsSnapshot {
        let snapshot = &mut self.snapshot;
        if update.head_block >= snapshot.block_number {
            snapshot.block_number = update.head_block;
            snapshot.gas_price = update.gas_price;
            snapshot.last_updated = snapshot.last_updated.max(update.observed_at);
        } else {
            debug!(
                head = update.head_block,
                cached = snapshot.block_number,
                "Ignoring head from a late update"
            );
        }

        if let Some(observation) = update.observation {
            let is_new = snapshot
                .last_processed_block
                .is_none_or(|last| observation.number > last);

            if is_new {
                debug!(
                    block = observation.number,
                    transactions = observation.transaction_count,
                    addresses = observation.addresses.len(),
                    "Folding block into network stats"
                );
                snapshot.tps = observation.transaction_count;
                snapshot.chain_metrics.c += observation.transaction_count;
                snapshot.last_processed_block = Some(observation.number);
                self.window
                    .observe(observation.addresses, observation.timestamp);
            }
        }

        snapshot.active_addresses = self.window.len() as u64;
        snapshot.clone()
    }
}

/// Cloneable access to the cache task.
#[derive(Clone)]
pub struct StatsCacheHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<NetworkStatsSnapshot>,
}

impl StatsCacheHandle {
    /// Latest published snapshot.
    pub fn snapshot(&self) -> NetworkStatsSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Submit an update and wait for the snapshot it produced.
    pub async fn apply(&self, update: StatsUpdate) -> Result<NetworkStatsSnapshot, StatsCacheError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Apply { update, reply })
            .await
            .map_err(|_| StatsCacheError::Closed)?;
        response.await.map_err(|_| StatsCacheError::Closed)
    }
}
