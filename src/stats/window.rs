// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sliding window of recently active addresses.

use std::collections::HashMap;

/// Length of the active-address window, in seconds.
pub const ACTIVE_WINDOW_SECS: u64 = 24 * 60 * 60;

/// Distinct addresses keyed by the timestamp of the newest block they
/// appeared in. Entries older than the window, measured from the newest
/// observed block, are evicted on every observation.
#[derive(Debug, Clone)]
pub struct ActiveAddressWindow {
    last_seen: HashMap<String, u64>,
    window_secs: u64,
}

impl ActiveAddressWindow {
    pub fn new(window_secs: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            window_secs,
        }
    }

    /// Record `addresses` as seen in a block with timestamp `at`, then evict
    /// everything last seen before `at - window`.
    pub fn observe<I>(&mut self, addresses: I, at: u64)
    where
        I: IntoIterator<Item = String>,
    {
        for address in addresses {
            // Checksummed and lowercase spellings are the same account.
            let seen = self.last_seen.entry(address.to_ascii_lowercase()).or_insert(at);
            *seen = (*seen).max(at);
        }

        let cutoff = at.saturating_sub(self.window_secs);
        self.last_seen.retain(|_, seen| *seen >= cutoff);
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }
}

impl Default for ActiveAddressWindow {
    fn default() -> Self {
        Self::new(ACTIVE_WINDOW_SECS)
    }
}
