// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::test_exports::{child_with, extend_chain, TestLedger, TEST_DIFFICULTY};
use crate::{DefaultBlockValidator, DefaultTransactionValidator};
use ledger_hash::Hash;
use ledger_models::test_exports::{
    address_of, create_block, create_importance_transfer, create_multisig_modification,
    create_transfer, random_address,
};
use ledger_models::transaction::{CosignatoryModificationKind, ImportanceTransferMode};
use ledger_models::validation::{FailureReason, ValidationResult};
use ledger_models::{Address, Amount, Block, BlockHeight, Transaction};
use ledger_signature::KeyPair;
use ledger_state::{AccountState, ChainLookup};
use ledger_sync_exports::{BlockValidator, SyncConfig, TransactionValidator};
use ledger_time::LedgerTime;
use std::sync::Arc;

fn funded_ledger(funded: &[(&KeyPair, u64)]) -> TestLedger {
    TestLedger::new(
        SyncConfig::default(),
        funded
            .iter()
            .map(|(keypair, balance)| {
                AccountState::with_balance(address_of(keypair), Amount::from_raw(*balance))
            })
            .collect(),
    )
}

fn tip(ledger: &TestLedger) -> Block {
    ledger.state.snapshot().chain().last_block().block.as_ref().clone()
}

/// Validates a block carrying `transactions` on top of the local chain
fn validate_transactions(
    ledger: &TestLedger,
    harvester: &KeyPair,
    transactions: Vec<Transaction>,
) -> ValidationResult {
    let block = child_with(harvester, &tip(ledger), TEST_DIFFICULTY, transactions);
    let view = ledger.state.create_view();
    DefaultTransactionValidator.validate(&block, &view)
}

fn transfer(from: &KeyPair, amount: u64, fee: u64, timestamp: LedgerTime) -> Transaction {
    create_transfer(
        from,
        random_address(),
        Amount::from_raw(amount),
        Amount::from_raw(fee),
        timestamp,
    )
}

#[test]
fn test_block_structure() {
    let ledger = funded_ledger(&[]);
    let harvester = KeyPair::generate();
    let validator = DefaultBlockValidator::new(&ledger.config, Arc::new(ledger.clock.clone()));
    let parent = &ledger.genesis;
    let next_height = parent.height().next();
    let timestamp = parent.timestamp().saturating_add(LedgerTime::from_secs(10));

    let valid = child_with(&harvester, parent, TEST_DIFFICULTY, vec![]);
    assert_eq!(validator.validate(parent, &valid), ValidationResult::Success);

    let skipping = create_block(&harvester, parent.hash(), BlockHeight::new(3), timestamp, 1, vec![]);
    assert_eq!(
        validator.validate(parent, &skipping),
        ValidationResult::Failure(FailureReason::InvalidHeight)
    );

    let unlinked = create_block(
        &harvester,
        Hash::compute_from(b"somewhere else"),
        next_height,
        timestamp,
        1,
        vec![],
    );
    assert_eq!(
        validator.validate(parent, &unlinked),
        ValidationResult::Failure(FailureReason::PreviousHashMismatch)
    );

    let same_time = create_block(&harvester, parent.hash(), next_height, parent.timestamp(), 1, vec![]);
    assert_eq!(
        validator.validate(parent, &same_time),
        ValidationResult::Failure(FailureReason::TimestampNotAfterParent)
    );

    let early = create_block(
        &harvester,
        parent.hash(),
        next_height,
        parent.timestamp().saturating_add(LedgerTime::from_secs(61)),
        1,
        vec![],
    );
    assert_eq!(
        validator.validate(parent, &early),
        ValidationResult::Failure(FailureReason::TimestampTooFarInFuture)
    );
    ledger.clock.advance(LedgerTime::from_secs(1));
    assert_eq!(validator.validate(parent, &early), ValidationResult::Success);

    let mut tampered = valid.clone();
    tampered.content.difficulty += 1;
    assert_eq!(
        validator.validate(parent, &tampered),
        ValidationResult::Failure(FailureReason::BlockUnverifiable)
    );
}

#[test]
fn test_block_transactions_structure() {
    let alice = KeyPair::generate();
    let ledger = funded_ledger(&[(&alice, 1_000)]);
    let harvester = KeyPair::generate();
    let parent = &ledger.genesis;
    let at = parent.timestamp();

    let config = SyncConfig {
        max_transactions_per_block: 1,
        ..SyncConfig::default()
    };
    let validator = DefaultBlockValidator::new(&config, Arc::new(ledger.clock.clone()));
    let crowded = child_with(
        &harvester,
        parent,
        TEST_DIFFICULTY,
        vec![transfer(&alice, 1, 1, at), transfer(&alice, 2, 1, at)],
    );
    assert_eq!(
        validator.validate(parent, &crowded),
        ValidationResult::Failure(FailureReason::TooManyTransactions)
    );

    let mut forged = transfer(&alice, 1, 1, at);
    forged.content.fee = Amount::zero();
    let carrying_forged = child_with(&harvester, parent, TEST_DIFFICULTY, vec![forged.clone()]);
    assert_eq!(
        validator.validate(parent, &carrying_forged),
        ValidationResult::Failure(FailureReason::TransactionUnverifiable(forged.id))
    );
}

#[test]
fn test_balances_are_projected_through_the_block() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();
    let ledger = funded_ledger(&[(&alice, 100), (&bob, 100)]);
    let harvester = KeyPair::generate();
    let at = ledger.genesis.timestamp();

    let first = transfer(&alice, 60, 1, at);
    let second = transfer(&alice, 60, 2, at);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![first.clone()]),
        ValidationResult::Success
    );
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![first, second.clone()]),
        ValidationResult::Failure(FailureReason::InsufficientBalance(second.id))
    );

    // funds received earlier in the block can be spent
    let from_bob = create_transfer(
        &bob,
        address_of(&alice),
        Amount::from_raw(50),
        Amount::from_raw(1),
        at,
    );
    assert_eq!(
        validate_transactions(
            &ledger,
            &harvester,
            vec![from_bob, transfer(&alice, 140, 5, at)]
        ),
        ValidationResult::Success
    );
}

#[test]
fn test_transaction_context() {
    let alice = KeyPair::generate();
    let ledger = funded_ledger(&[(&alice, 1_000)]);
    let harvester = KeyPair::generate();
    let at = ledger.genesis.timestamp();

    let tx = transfer(&alice, 10, 1, at);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![tx.clone(), tx.clone()]),
        ValidationResult::Failure(FailureReason::DuplicateTransaction(tx.id))
    );
    assert_eq!(
        validate_transactions(&ledger, &alice, vec![tx.clone()]),
        ValidationResult::Failure(FailureReason::SelfSignedTransaction(tx.id))
    );

    let block = child_with(&harvester, &ledger.genesis, TEST_DIFFICULTY, vec![tx.clone()]);
    let future = transfer(&alice, 10, 1, block.timestamp().saturating_add(LedgerTime::from_secs(1)));
    let view = ledger.state.create_view();
    let validator = DefaultTransactionValidator;
    let with_future = child_with(&harvester, &ledger.genesis, TEST_DIFFICULTY, vec![future.clone()]);
    assert_eq!(
        validator.validate(&with_future, &view),
        ValidationResult::Failure(FailureReason::TransactionFromFuture(future.id))
    );
    let late = create_block(
        &harvester,
        ledger.genesis.hash(),
        BlockHeight::new(2),
        at.saturating_add(LedgerTime::from_secs(7_200)),
        TEST_DIFFICULTY,
        vec![tx.clone()],
    );
    assert_eq!(
        validator.validate(&late, &view),
        ValidationResult::Failure(FailureReason::PastDeadline(tx.id))
    );
    drop(view);

    ledger.append(&[block]);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![tx.clone()]),
        ValidationResult::Failure(FailureReason::TransactionConfirmed(tx.id))
    );
}

#[test]
fn test_importance_transfers() {
    let alice = KeyPair::generate();
    let remote = KeyPair::generate();
    let ledger = funded_ledger(&[(&alice, 1_000)]);
    let harvester = KeyPair::generate();
    let at = ledger.genesis.timestamp();
    let link = |signer: &KeyPair, to: &KeyPair, mode, fee| {
        create_importance_transfer(signer, address_of(to), mode, Amount::from_raw(fee), at)
    };

    let activation = link(&alice, &remote, ImportanceTransferMode::Activate, 1);
    let twice = link(&alice, &KeyPair::generate(), ImportanceTransferMode::Activate, 2);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![activation.clone(), twice.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferInProgress(twice.id))
    );
    let to_self = link(&alice, &alice, ImportanceTransferMode::Activate, 1);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![to_self.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferConflict(to_self.id))
    );
    let block = child_with(&harvester, &ledger.genesis, TEST_DIFFICULTY, vec![activation]);
    ledger.append(&[block]);

    // height 3: the activation confirmed at height 2 is not effective yet
    let deactivation = link(&alice, &remote, ImportanceTransferMode::Deactivate, 1);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![deactivation.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferInProgress(deactivation.id))
    );

    ledger.append(&extend_chain(&harvester, &tip(&ledger), 2, TEST_DIFFICULTY));
    assert_eq!(tip(&ledger).height(), BlockHeight::new(4));
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![deactivation]),
        ValidationResult::Success
    );
    let again = link(&alice, &KeyPair::generate(), ImportanceTransferMode::Activate, 1);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![again.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferConflict(again.id))
    );
    let wrong_remote = link(&alice, &KeyPair::generate(), ImportanceTransferMode::Deactivate, 1);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![wrong_remote.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferConflict(wrong_remote.id))
    );
    let by_remote = link(&remote, &KeyPair::generate(), ImportanceTransferMode::Activate, 1);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![by_remote.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferConflict(by_remote.id))
    );
}

#[test]
fn test_activation_needs_an_unused_remote() {
    let alice = KeyPair::generate();
    let funded = KeyPair::generate();
    let ledger = funded_ledger(&[(&alice, 1_000), (&funded, 1_000)]);
    let harvester = KeyPair::generate();
    let at = ledger.genesis.timestamp();
    let activate = |remote: Address, fee| {
        create_importance_transfer(
            &alice,
            remote,
            ImportanceTransferMode::Activate,
            Amount::from_raw(fee),
            at,
        )
    };

    let to_funded = activate(address_of(&funded), 1);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![to_funded.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferRemoteInUse(to_funded.id))
    );

    // coins sent earlier in the same block count
    let remote = random_address();
    let payment = create_transfer(&alice, remote, Amount::from_raw(5), Amount::from_raw(1), at);
    let after_payment = activate(remote, 2);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![payment, after_payment.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferRemoteInUse(after_payment.id))
    );

    let cosigner = KeyPair::generate();
    let cosign = create_multisig_modification(
        &funded,
        CosignatoryModificationKind::Add,
        &[address_of(&cosigner)],
        Amount::from_raw(1),
        at,
    );
    let to_cosigner = activate(address_of(&cosigner), 3);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![cosign, to_cosigner.clone()]),
        ValidationResult::Failure(FailureReason::ImportanceTransferRemoteInUse(to_cosigner.id))
    );

    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![activate(random_address(), 1)]),
        ValidationResult::Success
    );
}

#[test]
fn test_multisig_modifications() {
    let alice = KeyPair::generate();
    let ledger = funded_ledger(&[(&alice, 1_000)]);
    let harvester = KeyPair::generate();
    let at = ledger.genesis.timestamp();
    let carol = random_address();
    let modify = |kind, fee| {
        create_multisig_modification(&alice, kind, &[carol], Amount::from_raw(fee), at)
    };

    let add = modify(CosignatoryModificationKind::Add, 1);
    let add_again = modify(CosignatoryModificationKind::Add, 2);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![add.clone(), add_again.clone()]),
        ValidationResult::Failure(FailureReason::MultisigAlreadyCosignatory(add_again.id))
    );
    let del = modify(CosignatoryModificationKind::Del, 1);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![del.clone()]),
        ValidationResult::Failure(FailureReason::MultisigNotCosignatory(del.id))
    );
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![add.clone(), del.clone()]),
        ValidationResult::Success
    );

    let block = child_with(&harvester, &ledger.genesis, TEST_DIFFICULTY, vec![add]);
    ledger.append(&[block]);
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![add_again.clone()]),
        ValidationResult::Failure(FailureReason::MultisigAlreadyCosignatory(add_again.id))
    );
    assert_eq!(
        validate_transactions(&ledger, &harvester, vec![del]),
        ValidationResult::Success
    );
}
