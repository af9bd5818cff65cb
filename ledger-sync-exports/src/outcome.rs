// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::comparison::ComparisonResultCode;
use displaydoc::Display;
use ledger_models::validation::FailureReason;
use ledger_models::{BlockHeight, ChainScore};

/// Why a round ended without changing the local chain, with nobody to blame
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotNeededReason {
    /// no peer is available
    NoPeer,
    /// peer chain score is not higher than ours
    ScoreNotHigher,
    /// peer last block is our last block
    AlreadySynced,
    /// peer is behind us
    RemoteBehind,
    /// peer returned no block
    RemoteHasNoBlocks,
    /// the local chain changed during the round
    LocalChainChanged,
    /// block is already part of the local chain
    AlreadyKnown,
    /// block parent is not part of the local chain
    UnknownParent,
    /// a validator could not decide on the peer chain
    ValidationInconclusive,
}

/// Why a peer chain was not even fetched
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceReason {
    /// no common block within the lookback window
    NoCommonAncestor,
    /// adopting the peer chain would roll back more blocks than allowed
    RewriteLimitExceeded,
}

/// Outcome of a synchronization round
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// adopted the peer chain: rolled back {rolled_back} blocks, applied {applied}, new height {height}
    Adopted {
        /// number of local blocks rolled back
        rolled_back: usize,
        /// number of peer blocks applied
        applied: usize,
        /// new local height
        height: BlockHeight,
        /// new local chain score
        score: ChainScore,
    },
    /// nothing to do: {0}
    NotNeeded(NotNeededReason),
    /// peer chain is too divergent: {0}
    RejectedTooDivergent(DivergenceReason),
    /// peer chain is invalid: {0}
    RejectedInvalid(FailureReason),
}

/// How a round should weigh on the trust placed in the peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeInteractionResult {
    /// the peer was useful
    Success,
    /// nothing to credit or blame
    Neutral,
    /// the peer misbehaved
    Failure,
}

impl SyncOutcome {
    /// Effect of the outcome on the peer trust
    pub fn interaction_result(&self) -> NodeInteractionResult {
        match self {
            SyncOutcome::Adopted { .. } => NodeInteractionResult::Success,
            SyncOutcome::NotNeeded(_) | SyncOutcome::RejectedTooDivergent(_) => {
                NodeInteractionResult::Neutral
            }
            SyncOutcome::RejectedInvalid(_) => NodeInteractionResult::Failure,
        }
    }

    /// Outcome of a comparison that stopped the round, `None` when the peer chain
    /// must be fetched
    pub fn from_comparison(code: ComparisonResultCode) -> Option<Self> {
        let outcome = match code {
            ComparisonResultCode::RemoteReportedLowerChainScore
            | ComparisonResultCode::RemoteReportedEqualChainScore => {
                SyncOutcome::NotNeeded(NotNeededReason::ScoreNotHigher)
            }
            ComparisonResultCode::RemoteHasNoBlocks => {
                SyncOutcome::NotNeeded(NotNeededReason::RemoteHasNoBlocks)
            }
            ComparisonResultCode::RemoteHasNonVerifiableBlock => {
                SyncOutcome::RejectedInvalid(FailureReason::BlockUnverifiable)
            }
            ComparisonResultCode::RemoteIsSynced => {
                SyncOutcome::NotNeeded(NotNeededReason::AlreadySynced)
            }
            ComparisonResultCode::RemoteIsTooFarBehind => {
                SyncOutcome::NotNeeded(NotNeededReason::RemoteBehind)
            }
            ComparisonResultCode::RemoteReturnedTooManyHashes => {
                SyncOutcome::RejectedInvalid(FailureReason::ChainTooLong)
            }
            ComparisonResultCode::RemoteReturnedInvalidHashes => {
                SyncOutcome::RejectedTooDivergent(DivergenceReason::NoCommonAncestor)
            }
            ComparisonResultCode::RemoteLiedAboutChainScore => {
                SyncOutcome::RejectedInvalid(FailureReason::ChainScoreInferior)
            }
            ComparisonResultCode::RemoteIsNotSynced => return None,
        };
        Some(outcome)
    }
}
