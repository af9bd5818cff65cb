// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::amount::Amount;
use crate::notification::Notification;
use crate::test_exports::{
    address_of, create_importance_transfer, create_multisig_modification, create_transfer,
    random_address, RecordingObserver,
};
use crate::transaction::{CosignatoryModificationKind, ImportanceTransferMode};
use crate::ModelsError;
use assert_matches::assert_matches;
use ledger_signature::KeyPair;
use ledger_time::LedgerTime;

#[test]
fn transfer_execute_emits_account_transfer_then_fee() {
    let keypair = KeyPair::generate();
    let signer = address_of(&keypair);
    let recipient = random_address();
    let tx = create_transfer(
        &keypair,
        recipient,
        Amount::from_raw(10),
        Amount::from_raw(2),
        LedgerTime::from_millis(0),
    );

    let mut recorder = RecordingObserver::default();
    tx.execute(&mut recorder);

    assert_eq!(
        recorder.notifications,
        vec![
            Notification::AccountSeen { account: recipient },
            Notification::BalanceTransfer {
                sender: signer,
                recipient,
                amount: Amount::from_raw(10),
            },
            Notification::BalanceDebit {
                account: signer,
                amount: Amount::from_raw(2),
            },
        ]
    );
}

#[test]
fn transfer_undo_is_the_reversed_execution() {
    let keypair = KeyPair::generate();
    let signer = address_of(&keypair);
    let recipient = random_address();
    let tx = create_transfer(
        &keypair,
        recipient,
        Amount::from_raw(10),
        Amount::from_raw(2),
        LedgerTime::from_millis(0),
    );

    let mut recorder = RecordingObserver::default();
    tx.undo(&mut recorder);

    assert_eq!(
        recorder.notifications,
        vec![
            Notification::BalanceCredit {
                account: signer,
                amount: Amount::from_raw(2),
            },
            Notification::BalanceTransfer {
                sender: recipient,
                recipient: signer,
                amount: Amount::from_raw(10),
            },
            Notification::AccountSeen { account: recipient },
        ]
    );
}

#[test]
fn importance_transfer_and_multisig_notifications() {
    let keypair = KeyPair::generate();
    let signer = address_of(&keypair);
    let remote = random_address();
    let tx = create_importance_transfer(
        &keypair,
        remote,
        ImportanceTransferMode::Activate,
        Amount::from_raw(1),
        LedgerTime::from_millis(0),
    );
    let mut recorder = RecordingObserver::default();
    tx.execute(&mut recorder);
    assert_eq!(
        recorder.notifications[1],
        Notification::ImportanceTransfer {
            lessor: signer,
            lessee: remote,
            mode: ImportanceTransferMode::Activate,
        }
    );

    let cosignatories = [random_address(), random_address()];
    let tx = create_multisig_modification(
        &keypair,
        CosignatoryModificationKind::Add,
        &cosignatories,
        Amount::from_raw(1),
        LedgerTime::from_millis(0),
    );
    let mut recorder = RecordingObserver::default();
    tx.execute(&mut recorder);
    // two (seen, modification) pairs then the fee
    assert_eq!(recorder.notifications.len(), 5);
    assert_eq!(
        recorder.notifications[2],
        Notification::AccountSeen {
            account: cosignatories[1]
        }
    );
    assert_eq!(tx.other_accounts(), cosignatories.to_vec());
}

#[test]
fn tampered_transaction_does_not_verify() {
    let keypair = KeyPair::generate();
    let mut tx = create_transfer(
        &keypair,
        random_address(),
        Amount::from_raw(10),
        Amount::from_raw(2),
        LedgerTime::from_millis(0),
    );
    tx.verify_signature().unwrap();
    tx.content.fee = Amount::from_raw(0);
    assert_matches!(tx.verify_signature(), Err(ModelsError::IdMismatch { .. }));
}
