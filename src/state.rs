// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    blockchain::{AvaxClient, ChainRpc},
    config::Config,
    indexer::{GlacierClient, GlacierError},
    placeholder::{PlaceholderData, StaticPlaceholders},
    stats::{StatsCache, StatsCacheHandle},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Upstream JSON-RPC node, absent when `AVALANCHE_RPC` is unset.
    pub rpc: Option<Arc<dyn ChainRpc>>,
    pub glacier: Option<Arc<GlacierClient>>,
    pub placeholders: Arc<dyn PlaceholderData>,
    pub stats: StatsCacheHandle,
}

impl AppState {
    /// Build upstream clients from `config` and spawn the stats cache task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_config(config: Config, shutdown: CancellationToken) -> Result<Self, GlacierError> {
        let rpc = config.rpc_url.clone().map(|url| {
            Arc::new(AvaxClient::new(url, config.upstream_timeout)) as Arc<dyn ChainRpc>
        });
        let glacier = config
            .glacier
            .as_ref()
            .map(|glacier| GlacierClient::new(glacier, config.upstream_timeout))
            .transpose()?
            .map(Arc::new);

        Ok(Self::new(
            config,
            rpc,
            glacier,
            Arc::new(StaticPlaceholders),
            shutdown,
        ))
    }

    pub fn new(
        config: Config,
        rpc: Option<Arc<dyn ChainRpc>>,
        glacier: Option<Arc<GlacierClient>>,
        placeholders: Arc<dyn PlaceholderData>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config: Arc::new(config),
            rpc,
            glacier,
            placeholders,
            stats: StatsCache::default().spawn(shutdown),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State with default configuration and no upstream clients.
    pub fn offline(shutdown: CancellationToken) -> Self {
        Self::new(
            Config::default(),
            None,
            None,
            Arc::new(StaticPlaceholders),
            shutdown,
        )
    }

    pub fn with_rpc(mut self, rpc: Arc<dyn ChainRpc>) -> Self {
        self.rpc = Some(rpc);
        self
    }

    pub fn with_glacier(mut self, glacier: GlacierClient) -> Self {
        self.glacier = Some(Arc::new(glacier));
        self
    }
}
