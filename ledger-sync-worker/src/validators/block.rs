// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_models::validation::{FailureReason, ValidationResult};
use ledger_models::Block;
use ledger_sync_exports::{BlockValidator, SyncConfig};
use ledger_time::{Clock, LedgerTime};
use std::sync::Arc;
use tracing::{debug, warn};

/// Structural checks of a block against its parent
pub struct DefaultBlockValidator {
    max_time_ahead: LedgerTime,
    max_transactions_per_block: usize,
    clock: Arc<dyn Clock>,
}

impl DefaultBlockValidator {
    /// Validator reading the current time from `clock`
    pub fn new(config: &SyncConfig, clock: Arc<dyn Clock>) -> Self {
        DefaultBlockValidator {
            max_time_ahead: config.max_time_ahead,
            max_transactions_per_block: config.max_transactions_per_block,
            clock,
        }
    }
}

impl BlockValidator for DefaultBlockValidator {
    fn validate(&self, parent: &Block, block: &Block) -> ValidationResult {
        if block.height() != parent.height().next() {
            return ValidationResult::Failure(FailureReason::InvalidHeight);
        }
        if block.content.previous_block_hash != parent.hash() {
            return ValidationResult::Failure(FailureReason::PreviousHashMismatch);
        }
        if block.timestamp() <= parent.timestamp() {
            return ValidationResult::Failure(FailureReason::TimestampNotAfterParent);
        }
        let now = match self.clock.now() {
            Ok(now) => now,
            Err(err) => {
                warn!("could not read the clock to validate block {}: {}", block.hash(), err);
                return ValidationResult::Neutral;
            }
        };
        if block.timestamp() > now.saturating_add(self.max_time_ahead) {
            debug!(
                "block {} is stamped {}, local time is {}",
                block.hash(),
                block.timestamp().format_instant(),
                now.format_instant()
            );
            return ValidationResult::Failure(FailureReason::TimestampTooFarInFuture);
        }
        if block.content.transactions.len() > self.max_transactions_per_block {
            return ValidationResult::Failure(FailureReason::TooManyTransactions);
        }
        if block.verify_signature().is_err() {
            return ValidationResult::Failure(FailureReason::BlockUnverifiable);
        }
        for transaction in &block.content.transactions {
            if transaction.verify_signature().is_err() {
                return ValidationResult::Failure(FailureReason::TransactionUnverifiable(
                    transaction.id,
                ));
            }
        }
        ValidationResult::Success
    }
}
