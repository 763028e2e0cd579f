// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`Config`] struct loaded once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `AVALANCHE_RPC` | Upstream C-Chain JSON-RPC endpoint | Unset (RPC endpoints fail) |
//! | `FRONTEND_URL` | Origin allowed by CORS | `http://localhost:3000` |
//! | `GLACIER_API_URL` | Glacier indexing API base URL | `https://glacier-api.avax.network/v1` |
//! | `GLACIER_API_KEY` | Glacier API key | Unset (indexer disabled) |
//! | `CHAIN_ID` | EVM chain id used in Glacier paths | `43114` |
//! | `NETWORK_STATS_SOURCE` | `rpc` or `indexer` | `rpc` |
//! | `UPSTREAM_TIMEOUT_SECS` | Timeout for every upstream call | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, str::FromStr, time::Duration};

use url::Url;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the upstream JSON-RPC endpoint.
///
/// When unset, the RPC-backed endpoints answer with a 500 instead of
/// failing startup, so the placeholder endpoints stay available.
pub const AVALANCHE_RPC_ENV: &str = "AVALANCHE_RPC";

pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";
pub const GLACIER_API_URL_ENV: &str = "GLACIER_API_URL";
pub const GLACIER_API_KEY_ENV: &str = "GLACIER_API_KEY";
pub const CHAIN_ID_ENV: &str = "CHAIN_ID";
pub const NETWORK_STATS_SOURCE_ENV: &str = "NETWORK_STATS_SOURCE";
pub const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_GLACIER_API_URL: &str = "https://glacier-api.avax.network/v1";
pub const DEFAULT_CHAIN_ID: u64 = 43114;
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Where `/stats/network` gets its numbers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkStatsSource {
    /// Derive stats from the upstream RPC and the local stats cache.
    #[default]
    Rpc,
    /// Pass through pre-aggregated metrics from the Glacier API.
    Indexer,
}

impl FromStr for NetworkStatsSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rpc" => Ok(Self::Rpc),
            "indexer" | "glacier" => Ok(Self::Indexer),
            other => Err(ConfigError::Invalid {
                name: NETWORK_STATS_SOURCE_ENV,
                reason: format!("unknown source `{other}`, expected `rpc` or `indexer`"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Glacier indexing API settings. Present only when an API key is set.
#[derive(Debug, Clone)]
pub struct GlacierConfig {
    pub base_url: Url,
    pub api_key: String,
}

/// Service configuration, loaded from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rpc_url: Option<Url>,
    pub frontend_origin: String,
    pub glacier: Option<GlacierConfig>,
    pub chain_id: u64,
    pub network_stats_source: NetworkStatsSource,
    pub upstream_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Values are trimmed and empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let rpc_url = get(AVALANCHE_RPC_ENV)
            .map(|raw| parse_url(AVALANCHE_RPC_ENV, &raw))
            .transpose()?;

        let frontend_origin = get(FRONTEND_URL_ENV)
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        parse_url(FRONTEND_URL_ENV, &frontend_origin)?;

        let glacier = match get(GLACIER_API_KEY_ENV) {
            Some(api_key) => {
                let raw = get(GLACIER_API_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_GLACIER_API_URL.to_string());
                Some(GlacierConfig {
                    base_url: parse_url(GLACIER_API_URL_ENV, &raw)?,
                    api_key,
                })
            }
            None => None,
        };

        let chain_id = match get(CHAIN_ID_ENV) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: CHAIN_ID_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_CHAIN_ID,
        };

        let network_stats_source = get(NETWORK_STATS_SOURCE_ENV)
            .map(|raw| raw.parse::<NetworkStatsSource>())
            .transpose()?
            .unwrap_or_default();
        if network_stats_source == NetworkStatsSource::Indexer && glacier.is_none() {
            return Err(ConfigError::Missing(GLACIER_API_KEY_ENV));
        }

        let upstream_timeout = match get(UPSTREAM_TIMEOUT_ENV) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: UPSTREAM_TIMEOUT_ENV,
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: UPSTREAM_TIMEOUT_ENV,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_UPSTREAM_TIMEOUT,
        };

        Ok(Self {
            bind_addr,
            rpc_url,
            frontend_origin,
            glacier,
            chain_id,
            network_stats_source,
            upstream_timeout,
            log_format: LogFormat::parse(get(LOG_FORMAT_ENV)),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            rpc_url: None,
            frontend_origin: DEFAULT_FRONTEND_URL.to_string(),
            glacier: None,
            chain_id: DEFAULT_CHAIN_ID,
            network_stats_source: NetworkStatsSource::Rpc,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse::<Url>().map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
