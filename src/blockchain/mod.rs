// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Avalanche C-Chain.
//!
//! This module provides functionality for:
//! - Querying head block, gas price, blocks, transactions and receipts
//! - Formatting wei amounts as AVAX and gwei

pub mod client;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::{AvaxClient, AvaxClientError, ChainRpc};
pub use types::*;
