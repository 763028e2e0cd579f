// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain projections and unit formatting.

use alloy::primitives::U256;

/// Number of blocks subtracted from the chain head before reading data,
/// so that reads land on blocks that are no longer subject to reorgs.
pub const SAFE_BLOCK_OFFSET: u64 = 100;

/// Decimals of the native AVAX token (wei-style smallest unit).
pub const AVAX_DECIMALS: u8 = 18;

/// Decimals of the gwei display unit.
pub const GWEI_DECIMALS: u8 = 9;

/// Block as seen through the upstream RPC, with transaction hashes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub number: u64,
    pub hash: String,
    /// Unix seconds.
    pub timestamp: u64,
    pub transactions: Vec<String>,
}

/// Transaction fields the aggregator cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetails {
    pub hash: String,
    pub from: String,
    /// `None` for contract creations.
    pub to: Option<String>,
    /// Value in wei.
    pub value: U256,
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub gas_used: u64,
    pub success: bool,
}

/// Block number that is `SAFE_BLOCK_OFFSET` behind `head`.
pub fn safe_block_number(head: u64) -> u64 {
    head.saturating_sub(SAFE_BLOCK_OFFSET)
}

/// Format a raw amount as a decimal string with the given number of decimals.
///
/// Keeps full precision, trims trailing zeros and always keeps at least one
/// fractional digit (`1.0`, `0.5`, `25.000000001`).
pub fn format_units(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if decimals == 0 {
        return format!("{whole}.0");
    }

    let fraction = format!("{:0>width$}", remainder, width = decimals as usize);
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Format a wei amount as AVAX.
pub fn format_avax(wei: U256) -> String {
    format_units(wei, AVAX_DECIMALS)
}

/// Format a wei gas price as gwei.
pub fn format_gwei(wei: u128) -> String {
    format_units(U256::from(wei), GWEI_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_avax() {
        let one_avax = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_avax(one_avax), "1.0");

        let half_avax = U256::from(500_000_000_000_000_000u64);
        assert_eq!(format_avax(half_avax), "0.5");

        // Full precision is kept
        let complex = U256::from(1_234_567_890_000_000_001u64);
        assert_eq!(format_avax(complex), "1.234567890000000001");

        assert_eq!(format_avax(U256::ZERO), "0.0");
    }

    #[test]
    fn test_format_gwei() {
        assert_eq!(format_gwei(25_000_000_000), "25.0");
        assert_eq!(format_gwei(1_500_000_000), "1.5");
        assert_eq!(format_gwei(1), "0.000000001");
        assert_eq!(format_gwei(0), "0.0");
    }

    #[test]
    fn safe_block_saturates_near_genesis() {
        assert_eq!(safe_block_number(1000), 900);
        assert_eq!(safe_block_number(100), 0);
        assert_eq!(safe_block_number(42), 0);
    }
}
