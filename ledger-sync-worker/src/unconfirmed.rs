// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_hash::Hash;
use ledger_models::validation::{FailureReason, ValidationResult};
use ledger_models::{Block, Transaction};
use ledger_state::LedgerState;
use ledger_sync_exports::UnconfirmedTransactions;
use ledger_time::Clock;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// In-memory pool of transactions waiting for a block.
///
/// Every transaction entering the pool is checked against the committed ledger state
/// and the clock, whether it comes from the network or from a rolled back block.
pub struct DefaultUnconfirmedTransactions {
    state: Arc<LedgerState>,
    clock: Arc<dyn Clock>,
    transactions: Mutex<HashMap<Hash, Transaction>>,
}

impl DefaultUnconfirmedTransactions {
    /// Empty pool
    pub fn new(state: Arc<LedgerState>, clock: Arc<dyn Clock>) -> Self {
        DefaultUnconfirmedTransactions {
            state,
            clock,
            transactions: Mutex::new(HashMap::new()),
        }
    }

    fn check(&self, transaction: &Transaction, known: &HashMap<Hash, Transaction>) -> ValidationResult {
        let hash = transaction.id;
        if known.contains_key(&hash) {
            return ValidationResult::Neutral;
        }
        if transaction.verify_signature().is_err() {
            return ValidationResult::Failure(FailureReason::TransactionUnverifiable(hash));
        }
        let now = match self.clock.now() {
            Ok(now) => now,
            Err(err) => {
                warn!("could not read the clock to check transaction {}: {}", hash, err);
                return ValidationResult::Neutral;
            }
        };
        if transaction.content.deadline < now {
            return ValidationResult::Failure(FailureReason::PastDeadline(hash));
        }
        if self.state.snapshot().contains_hash(&hash) {
            return ValidationResult::Neutral;
        }
        ValidationResult::Success
    }

    fn add(&self, transaction: Transaction) -> ValidationResult {
        let mut transactions = self.transactions.lock();
        let result = self.check(&transaction, &transactions);
        if result.is_success() {
            transactions.insert(transaction.id, transaction);
        }
        result
    }
}

impl UnconfirmedTransactions for DefaultUnconfirmedTransactions {
    fn add_new(&self, transaction: Transaction) -> ValidationResult {
        let hash = transaction.id;
        let result = self.add(transaction);
        if let ValidationResult::Failure(reason) = &result {
            debug!("rejected unconfirmed transaction {}: {}", hash, reason);
        }
        result
    }

    fn add_new_batch(&self, transactions: Vec<Transaction>) -> ValidationResult {
        let mut added = false;
        let mut failure = None;
        for transaction in transactions {
            match self.add_new(transaction) {
                ValidationResult::Success => added = true,
                ValidationResult::Neutral => {}
                ValidationResult::Failure(reason) => {
                    failure.get_or_insert(reason);
                }
            }
        }
        match failure {
            Some(reason) => ValidationResult::Failure(reason),
            None if added => ValidationResult::Success,
            None => ValidationResult::Neutral,
        }
    }

    fn add_existing(&self, transaction: Transaction) -> ValidationResult {
        self.add(transaction)
    }

    fn remove_all(&self, block: &Block) {
        let mut transactions = self.transactions.lock();
        for transaction in &block.content.transactions {
            transactions.remove(&transaction.id);
        }
    }

    fn get_all(&self) -> Vec<Transaction> {
        let mut all: Vec<Transaction> = self.transactions.lock().values().cloned().collect();
        all.sort_by_key(|transaction| (transaction.content.timestamp, transaction.id));
        all
    }

    fn contains(&self, hash: &Hash) -> bool {
        self.transactions.lock().contains_key(hash)
    }

    fn len(&self) -> usize {
        self.transactions.lock().len()
    }
}
