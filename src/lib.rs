// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Avalanche Stats Aggregator
//!
//! HTTP service summarizing Avalanche C-Chain state from an upstream
//! JSON-RPC node and the Glacier indexing API.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Avalanche C-Chain RPC client
//! - `indexer` - Glacier indexing API client
//! - `placeholder` - Static data for endpoints without a live source
//! - `stats` - Endpoint logic and the network stats cache

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod fanout;
pub mod indexer;
pub mod logging;
pub mod models;
pub mod placeholder;
pub mod state;
pub mod stats;
