// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Glacier indexing API client.
//!
//! Glacier responses are reshaped defensively: every field the service
//! exposes has a default, so a partial or drifting upstream payload still
//! yields a well-formed response.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::GlacierConfig;
use crate::models::{CrossChainTransfer, NetworkStats};

const API_KEY_HEADER: &str = "x-glacier-api-key";

#[derive(Debug, thiserror::Error)]
pub enum GlacierError {
    #[error("Glacier request failed: {0}")]
    Request(String),

    #[error("Glacier response was invalid: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct GlacierClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl GlacierClient {
    pub fn new(config: &GlacierConfig, timeout: Duration) -> Result<Self, GlacierError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GlacierError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    /// Aggregated chain metrics, mapped onto the `/stats/network` shape.
    pub async fn network_metrics(&self, chain_id: u64) -> Result<NetworkStats, GlacierError> {
        let payload = self.get_json(&format!("/chains/{chain_id}/metrics")).await?;
        Ok(metrics_from_value(&payload))
    }

    /// Recent bridge transfers touching the chain.
    pub async fn bridge_transfers(
        &self,
        chain_id: u64,
    ) -> Result<Vec<CrossChainTransfer>, GlacierError> {
        let payload = self
            .get_json(&format!("/chains/{chain_id}/transactions?type=bridge"))
            .await?;

        let transfers = payload
            .get("transactions")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(transfer_from_value).collect())
            .unwrap_or_default();

        Ok(transfers)
    }

    async fn get_json(&self, path: &str) -> Result<Value, GlacierError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| GlacierError::Request(format!("GET {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GlacierError::Request(format!(
                "GET {path} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GlacierError::InvalidResponse(format!("GET {path} invalid JSON: {e}")))
    }
}

fn metrics_from_value(payload: &Value) -> NetworkStats {
    NetworkStats {
        block_number: u64_field(payload, "blockHeight"),
        gas_price: string_field(payload, "gasPrice").unwrap_or_else(|| "0".to_string()),
        tps: u64_field(payload, "transactionsPerSecond"),
        active_addresses: u64_field(payload, "activeAddresses"),
        total_transactions24h: u64_field(payload, "totalTransactions"),
    }
}

fn transfer_from_value(entry: &Value) -> CrossChainTransfer {
    let text = |key: &str, default: &str| {
        string_field(entry, key).unwrap_or_else(|| default.to_string())
    };

    CrossChainTransfer {
        source_chain: text("fromChain", "Unknown"),
        destination_chain: text("toChain", "Avalanche"),
        hash: text("hash", ""),
        timestamp: entry.get("timestamp").and_then(Value::as_i64).unwrap_or(0),
        amount: text("amount", "0"),
        token: text("token", "AVAX"),
        status: text("status", "Completed"),
        kind: "Bridge".to_string(),
    }
}

/// Non-empty string field; numbers are stringified.
fn string_field(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Unsigned integer field, accepting numeric strings; anything else is zero.
fn u64_field(payload: &Value, key: &str) -> u64 {
    match payload.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
