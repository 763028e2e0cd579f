// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Indexing API
//!
//! Client for Glacier, the Avalanche indexing API. It serves pre-aggregated
//! chain metrics (`/chains/{id}/metrics`) and bridge transfer records
//! (`/chains/{id}/transactions?type=bridge`), used as a faster alternative
//! to deriving the same data from the JSON-RPC node.

pub mod glacier;

pub use glacier::{GlacierClient, GlacierError};
