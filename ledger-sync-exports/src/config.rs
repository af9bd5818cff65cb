// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This file defines a configuration structure containing all settings for the chain synchronizer

use ledger_time::LedgerTime;
use serde::Deserialize;

/// How a block contributes to the score of the chain it extends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainScoreMode {
    /// every block scores 1: the longest chain wins
    Height,
    /// a block scores its difficulty
    Difficulty,
    /// a block scores its difficulty minus the seconds elapsed since its parent
    TimeAdjustedDifficulty,
}

/// Synchronizer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// maximum number of hashes a peer may return when locating the common block
    pub max_blocks_to_analyze: usize,
    /// maximum number of local blocks a synchronization may roll back
    pub max_blocks_to_rewrite: u64,
    /// maximum number of peer blocks applied in one round
    pub max_blocks_per_sync: usize,
    /// maximum number of transactions in a block
    pub max_transactions_per_block: usize,
    /// bound for every request sent to a peer
    pub request_timeout: LedgerTime,
    /// how far in the future a block timestamp may be
    pub max_time_ahead: LedgerTime,
    /// block scoring formula
    pub score_mode: ChainScoreMode,
}

#[cfg(any(test, feature = "test-exports"))]
impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            max_blocks_to_analyze: 20,
            max_blocks_to_rewrite: 10,
            max_blocks_per_sync: 20,
            max_transactions_per_block: 100,
            request_timeout: LedgerTime::from_millis(1_000),
            max_time_ahead: LedgerTime::from_millis(60_000),
            score_mode: ChainScoreMode::Difficulty,
        }
    }
}
