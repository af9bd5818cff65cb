// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_models::BlockHeight;

/// Verdict of comparing the local chain with a peer chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonResultCode {
    /// peer chain score is lower than ours
    RemoteReportedLowerChainScore,
    /// peer chain score equals ours
    RemoteReportedEqualChainScore,
    /// peer returned no last block
    RemoteHasNoBlocks,
    /// peer last block does not verify
    RemoteHasNonVerifiableBlock,
    /// peer last block is our last block
    RemoteIsSynced,
    /// peer is further behind than we can roll back
    RemoteIsTooFarBehind,
    /// peer returned more hashes than requested
    RemoteReturnedTooManyHashes,
    /// no hash of the peer matches ours in the lookback window
    RemoteReturnedInvalidHashes,
    /// peer claims a better score while all its hashes are ours
    RemoteLiedAboutChainScore,
    /// peer has a better chain sharing a common block with ours
    RemoteIsNotSynced,
}

impl ComparisonResultCode {
    /// Whether the peer behaved in a way that deserves a penalty
    pub fn is_evil(&self) -> bool {
        matches!(
            self,
            ComparisonResultCode::RemoteHasNonVerifiableBlock
                | ComparisonResultCode::RemoteReturnedTooManyHashes
                | ComparisonResultCode::RemoteLiedAboutChainScore
        )
    }
}

/// Result of comparing the local chain with a peer chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonResult {
    /// verdict
    pub code: ComparisonResultCode,
    /// most recent block shared by both chains, when one was located
    pub common_block_height: Option<BlockHeight>,
    /// whether the common block is our last block, so nothing needs to be rolled back
    pub chains_consistent: bool,
    /// height of the peer last block, when it sent one
    pub remote_height: Option<BlockHeight>,
}

impl ComparisonResult {
    /// Result that stopped before locating a common block
    pub fn new(code: ComparisonResultCode, remote_height: Option<BlockHeight>) -> Self {
        ComparisonResult {
            code,
            common_block_height: None,
            chains_consistent: false,
            remote_height,
        }
    }

    /// Result of a peer that has a better chain forking at `common_block_height`
    pub fn not_synced(
        common_block_height: BlockHeight,
        local_height: BlockHeight,
        remote_height: BlockHeight,
    ) -> Self {
        ComparisonResult {
            code: ComparisonResultCode::RemoteIsNotSynced,
            common_block_height: Some(common_block_height),
            chains_consistent: common_block_height == local_height,
            remote_height: Some(remote_height),
        }
    }
}
