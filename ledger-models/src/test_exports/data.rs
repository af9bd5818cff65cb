// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::address::Address;
use crate::amount::Amount;
use crate::block::{Block, BlockContent};
use crate::height::BlockHeight;
use crate::secure_share::SecureShareContent;
use crate::transaction::{
    CosignatoryModification, CosignatoryModificationKind, ImportanceTransferMode, Transaction,
    TransactionContent, TransactionKind,
};
use ledger_hash::Hash;
use ledger_signature::KeyPair;
use ledger_time::LedgerTime;

/// Deadline given to fixture transactions, relative to their timestamp
pub const TEST_DEADLINE_DELTA: LedgerTime = LedgerTime::from_millis(3_600_000);

/// Address of a key pair
pub fn address_of(keypair: &KeyPair) -> Address {
    Address::from_public_key(&keypair.get_public_key())
}

/// Fresh random address
pub fn random_address() -> Address {
    address_of(&KeyPair::generate())
}

/// Signs a transaction of the given kind
pub fn create_transaction(
    keypair: &KeyPair,
    kind: TransactionKind,
    fee: Amount,
    timestamp: LedgerTime,
) -> Transaction {
    let content = TransactionContent {
        fee,
        timestamp,
        deadline: timestamp.saturating_add(TEST_DEADLINE_DELTA),
        kind,
    };
    TransactionContent::new_verifiable(content, keypair).unwrap()
}

/// Signs a transfer of `amount` to `recipient`
pub fn create_transfer(
    keypair: &KeyPair,
    recipient: Address,
    amount: Amount,
    fee: Amount,
    timestamp: LedgerTime,
) -> Transaction {
    create_transaction(
        keypair,
        TransactionKind::Transfer { recipient, amount },
        fee,
        timestamp,
    )
}

/// Signs an importance transfer to `remote`
pub fn create_importance_transfer(
    keypair: &KeyPair,
    remote: Address,
    mode: ImportanceTransferMode,
    fee: Amount,
    timestamp: LedgerTime,
) -> Transaction {
    create_transaction(
        keypair,
        TransactionKind::ImportanceTransfer { remote, mode },
        fee,
        timestamp,
    )
}

/// Signs a multisig modification adding or removing `cosignatories`
pub fn create_multisig_modification(
    keypair: &KeyPair,
    kind: CosignatoryModificationKind,
    cosignatories: &[Address],
    fee: Amount,
    timestamp: LedgerTime,
) -> Transaction {
    let modifications = cosignatories
        .iter()
        .map(|cosignatory| CosignatoryModification {
            kind,
            cosignatory: *cosignatory,
        })
        .collect();
    create_transaction(
        keypair,
        TransactionKind::MultisigModification { modifications },
        fee,
        timestamp,
    )
}

/// Signs a block
pub fn create_block(
    keypair: &KeyPair,
    previous_block_hash: Hash,
    height: BlockHeight,
    timestamp: LedgerTime,
    difficulty: u64,
    transactions: Vec<Transaction>,
) -> Block {
    let content = BlockContent {
        previous_block_hash,
        timestamp,
        height,
        difficulty,
        transactions,
    };
    BlockContent::new_verifiable(content, keypair).unwrap()
}

/// Signs a child of `parent`, `delta` after it
pub fn create_child_block(
    keypair: &KeyPair,
    parent: &Block,
    delta: LedgerTime,
    difficulty: u64,
    transactions: Vec<Transaction>,
) -> Block {
    create_block(
        keypair,
        parent.hash(),
        parent.height().next(),
        parent.timestamp().saturating_add(delta),
        difficulty,
        transactions,
    )
}
