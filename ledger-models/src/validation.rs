// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use ledger_hash::Hash;

/// Why a block or transaction was rejected
#[non_exhaustive]
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// block signature or content id does not verify
    BlockUnverifiable,
    /// block height is not parent height + 1
    InvalidHeight,
    /// block does not reference its parent hash
    PreviousHashMismatch,
    /// block timestamp is not after its parent
    TimestampNotAfterParent,
    /// timestamp is too far in the future
    TimestampTooFarInFuture,
    /// block carries too many transactions
    TooManyTransactions,
    /// transaction {0} signature or content id does not verify
    TransactionUnverifiable(Hash),
    /// transaction {0} deadline is before the block timestamp
    PastDeadline(Hash),
    /// transaction {0} is newer than the block containing it
    TransactionFromFuture(Hash),
    /// transaction {0} is signed by the block harvester
    SelfSignedTransaction(Hash),
    /// transaction {0} is already confirmed
    TransactionConfirmed(Hash),
    /// transaction {0} appears more than once
    DuplicateTransaction(Hash),
    /// transaction {0} spends more than the signer balance
    InsufficientBalance(Hash),
    /// transaction {0} conflicts with the current remote harvesting link
    ImportanceTransferConflict(Hash),
    /// transaction {0} changes a remote link before the previous change took effect
    ImportanceTransferInProgress(Hash),
    /// transaction {0} activates remote harvesting on an account already in use
    ImportanceTransferRemoteInUse(Hash),
    /// transaction {0} adds an existing cosignatory
    MultisigAlreadyCosignatory(Hash),
    /// transaction {0} removes an unknown cosignatory
    MultisigNotCosignatory(Hash),
    /// peer chain does not improve on the local chain score
    ChainScoreInferior,
    /// peer sent more blocks than allowed in one round
    ChainTooLong,
    /// peer chain does not continue from the common block
    ChainNotContiguous,
}

/// Outcome of a validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// accepted
    Success,
    /// neither accepted nor blamed on the sender
    Neutral,
    /// rejected
    Failure(FailureReason),
}

impl ValidationResult {
    /// Whether the result is `Success`
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success)
    }

    /// Whether the result is a `Failure`
    pub fn is_failure(&self) -> bool {
        matches!(self, ValidationResult::Failure(_))
    }
}
