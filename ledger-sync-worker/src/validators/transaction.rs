// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::projection::BalanceProjection;
use ledger_hash::Hash;
use ledger_models::observer::TransferObserverAdapter;
use ledger_models::transaction::{
    CosignatoryModification, CosignatoryModificationKind, ImportanceTransferMode,
};
use ledger_models::validation::{FailureReason, ValidationResult};
use ledger_models::{Address, Amount, Block, Transaction, TransactionKind};
use ledger_state::{RemoteLinkOwner, StateCache};
use ledger_sync_exports::TransactionValidator;
use std::collections::{HashMap, HashSet};

/// Contextual checks of the transactions of a block.
///
/// Transactions are checked in block order, each one seeing the effects of the
/// previous ones on balances, remote links and cosignatories.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTransactionValidator;

/// Changes made by the transactions of the block checked so far
struct BlockContext<'a> {
    block: &'a Block,
    state: &'a dyn StateCache,
    balances: BalanceProjection<'a>,
    hashes: HashSet<Hash>,
    relinked: HashSet<Address>,
    cosignatories: HashMap<(Address, Address), bool>,
}

impl<'a> BlockContext<'a> {
    fn new(block: &'a Block, state: &'a dyn StateCache) -> Self {
        BlockContext {
            block,
            state,
            balances: BalanceProjection::new(state),
            hashes: HashSet::new(),
            relinked: HashSet::new(),
            cosignatories: HashMap::new(),
        }
    }

    fn check(&mut self, transaction: &Transaction) -> Result<(), FailureReason> {
        let hash = transaction.id;
        if transaction.content.deadline < self.block.timestamp() {
            return Err(FailureReason::PastDeadline(hash));
        }
        if transaction.content.timestamp > self.block.timestamp() {
            return Err(FailureReason::TransactionFromFuture(hash));
        }
        if transaction.signer() == self.block.signer() {
            return Err(FailureReason::SelfSignedTransaction(hash));
        }
        if self.state.contains_hash(&hash) {
            return Err(FailureReason::TransactionConfirmed(hash));
        }
        if !self.hashes.insert(hash) {
            return Err(FailureReason::DuplicateTransaction(hash));
        }
        match &transaction.content.kind {
            TransactionKind::Transfer { .. } => {}
            TransactionKind::ImportanceTransfer { remote, mode } => {
                self.check_importance_transfer(transaction, remote, *mode)?
            }
            TransactionKind::MultisigModification { modifications } => {
                self.check_multisig_modification(transaction, modifications)?
            }
        }
        transaction.execute(&mut TransferObserverAdapter::new(&mut self.balances));
        if self.balances.take_overdrawn().is_some() {
            return Err(FailureReason::InsufficientBalance(hash));
        }
        Ok(())
    }

    /// Most recent link of `address` as (age in blocks, mode, owner, linked address)
    fn current_link(
        &self,
        address: &Address,
    ) -> Option<(u64, ImportanceTransferMode, RemoteLinkOwner, Address)> {
        let height = self.block.height();
        self.state
            .find_state(address)
            .and_then(|state| state.remote_links.current())
            .map(|link| {
                (
                    height.checked_sub(link.height).unwrap_or(0),
                    link.mode,
                    link.owner,
                    link.linked_address,
                )
            })
    }

    fn check_importance_transfer(
        &mut self,
        transaction: &Transaction,
        remote: &Address,
        mode: ImportanceTransferMode,
    ) -> Result<(), FailureReason> {
        let hash = transaction.id;
        let signer = transaction.signer();
        if signer == *remote {
            return Err(FailureReason::ImportanceTransferConflict(hash));
        }
        // one link change per account and per block
        if !self.relinked.insert(signer) || !self.relinked.insert(*remote) {
            return Err(FailureReason::ImportanceTransferInProgress(hash));
        }
        let delay = self.state.remote_harvesting_delay();
        let signer_link = self.current_link(&signer);
        let remote_link = self.current_link(remote);
        for (age, ..) in signer_link.iter().chain(remote_link.iter()) {
            if *age < delay {
                return Err(FailureReason::ImportanceTransferInProgress(hash));
            }
        }
        let consistent = match mode {
            ImportanceTransferMode::Activate => {
                !matches!(signer_link, Some((_, ImportanceTransferMode::Activate, ..)))
                    && !matches!(remote_link, Some((_, ImportanceTransferMode::Activate, ..)))
            }
            ImportanceTransferMode::Deactivate => matches!(
                signer_link,
                Some((_, ImportanceTransferMode::Activate, RemoteLinkOwner::HarvestingRemotely, linked))
                    if linked == *remote
            ),
        };
        if !consistent {
            return Err(FailureReason::ImportanceTransferConflict(hash));
        }
        if mode == ImportanceTransferMode::Activate && self.is_in_use(remote) {
            return Err(FailureReason::ImportanceTransferRemoteInUse(hash));
        }
        Ok(())
    }

    /// Whether `address` holds coins or takes part in a multisig relation
    fn is_in_use(&self, address: &Address) -> bool {
        if self.balances.balance_of(address) != Amount::zero() {
            return true;
        }
        let in_block = self
            .cosignatories
            .iter()
            .any(|((multisig, cosignatory), present)| {
                *present && (multisig == address || cosignatory == address)
            });
        in_block
            || self
                .state
                .find_state(address)
                .map_or(false, |state| !state.multisig_links.is_empty())
    }

    fn check_multisig_modification(
        &mut self,
        transaction: &Transaction,
        modifications: &[CosignatoryModification],
    ) -> Result<(), FailureReason> {
        let hash = transaction.id;
        let multisig = transaction.signer();
        for modification in modifications {
            let key = (multisig, modification.cosignatory);
            let present = match self.cosignatories.get(&key) {
                Some(present) => *present,
                None => self.state.find_state(&multisig).map_or(false, |state| {
                    state.multisig_links.is_cosignatory(&modification.cosignatory)
                }),
            };
            match modification.kind {
                CosignatoryModificationKind::Add if present => {
                    return Err(FailureReason::MultisigAlreadyCosignatory(hash))
                }
                CosignatoryModificationKind::Del if !present => {
                    return Err(FailureReason::MultisigNotCosignatory(hash))
                }
                CosignatoryModificationKind::Add => {
                    self.cosignatories.insert(key, true);
                }
                CosignatoryModificationKind::Del => {
                    self.cosignatories.insert(key, false);
                }
            }
        }
        Ok(())
    }
}

impl TransactionValidator for DefaultTransactionValidator {
    fn validate(&self, block: &Block, state: &dyn StateCache) -> ValidationResult {
        let mut context = BlockContext::new(block, state);
        for transaction in &block.content.transactions {
            if let Err(reason) = context.check(transaction) {
                return ValidationResult::Failure(reason);
            }
        }
        ValidationResult::Success
    }
}
