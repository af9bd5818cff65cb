// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{
    AccountState, AccountStateCache, ChainLookup, LedgerState, LedgerStateConfig,
    LedgerStateError, ReadOnlyAccountStateCache, TransactionHashCache,
};
use assert_matches::assert_matches;
use ledger_hash::Hash;
use ledger_models::notification::{HashMetaData, TransactionHashPair};
use ledger_models::test_exports::{create_block, create_child_block, random_address};
use ledger_models::{Address, Amount, Block, BlockHeight, ChainScore};
use ledger_signature::KeyPair;
use ledger_time::LedgerTime;

fn genesis(keypair: &KeyPair) -> Block {
    create_block(
        keypair,
        Hash::zero(),
        BlockHeight::GENESIS,
        LedgerTime::from_millis(0),
        1,
        vec![],
    )
}

fn state_with(accounts: &[(Address, u64)]) -> (LedgerState, KeyPair) {
    let keypair = KeyPair::generate();
    let state = LedgerState::new(
        LedgerStateConfig::default(),
        genesis(&keypair),
        ChainScore::new(1),
        accounts
            .iter()
            .map(|(address, balance)| AccountState::with_balance(*address, Amount::from_raw(*balance))),
    )
    .unwrap();
    (state, keypair)
}

#[test]
fn view_changes_are_invisible_until_commit() {
    let alice = random_address();
    let (state, _) = state_with(&[(alice, 100)]);
    let before = state.snapshot();

    let mut view = state.create_view();
    view.find_state_mut(&alice).debit(Amount::from_raw(40));
    assert_eq!(view.balance_of(&alice), Amount::from_raw(60));
    assert_eq!(state.snapshot().balance_of(&alice), Amount::from_raw(100));

    assert_eq!(state.commit(view).unwrap(), 1);
    assert_eq!(state.snapshot().balance_of(&alice), Amount::from_raw(60));
    // readers holding the old snapshot keep seeing the old state
    assert_eq!(before.balance_of(&alice), Amount::from_raw(100));
}

#[test]
fn dropped_view_leaves_state_untouched() {
    let alice = random_address();
    let (state, _) = state_with(&[(alice, 100)]);
    {
        let mut view = state.create_view();
        view.find_state_mut(&alice).debit(Amount::from_raw(40));
        view.remove_state(&alice);
    }
    let snapshot = state.snapshot();
    assert_eq!(snapshot.generation(), 0);
    assert_eq!(snapshot.balance_of(&alice), Amount::from_raw(100));
}

#[test]
fn stale_view_is_rejected() {
    let alice = random_address();
    let (state, _) = state_with(&[(alice, 100)]);
    let mut first = state.create_view();
    let mut second = state.create_view();
    first.find_state_mut(&alice).credit(Amount::from_raw(1));
    second.find_state_mut(&alice).credit(Amount::from_raw(2));

    state.commit(first).unwrap();
    assert_matches!(
        state.commit(second),
        Err(LedgerStateError::StaleView { view: 0, current: 1 })
    );
    assert_eq!(state.snapshot().balance_of(&alice), Amount::from_raw(101));
}

#[test]
fn pristine_accounts_are_not_kept() {
    let bob = random_address();
    let (state, _) = state_with(&[]);
    let mut view = state.create_view();
    view.find_state_mut(&bob).credit(Amount::from_raw(3));
    view.find_state_mut(&bob).debit(Amount::from_raw(3));
    state.commit(view).unwrap();
    assert!(state.snapshot().account(&bob).is_none());
}

#[test]
fn hash_overlay_tracks_put_and_remove() {
    let (state, _) = state_with(&[]);
    let hash = Hash::compute_from(b"tx");
    let pair = TransactionHashPair {
        hash,
        meta_data: HashMetaData {
            height: BlockHeight::new(2),
            timestamp: LedgerTime::from_millis(5),
        },
    };
    let mut view = state.create_view();
    view.put_hash(pair);
    assert!(view.contains_hash(&hash));
    state.commit(view).unwrap();
    assert!(state.snapshot().contains_hash(&hash));

    let mut view = state.create_view();
    view.remove_hash(&hash);
    assert!(!view.contains_hash(&hash));
    assert!(state.snapshot().contains_hash(&hash));
    state.commit(view).unwrap();
    assert!(!state.snapshot().contains_hash(&hash));

    let mut view = state.create_view();
    view.put_hash(pair);
    view.prune_hashes(BlockHeight::new(3));
    assert!(!view.contains_hash(&hash));
}

#[test]
#[should_panic(expected = "already confirmed")]
fn duplicate_hash_is_fatal() {
    let (state, _) = state_with(&[]);
    let pair = TransactionHashPair {
        hash: Hash::compute_from(b"tx"),
        meta_data: HashMetaData {
            height: BlockHeight::new(2),
            timestamp: LedgerTime::from_millis(5),
        },
    };
    let mut view = state.create_view();
    view.put_hash(pair);
    view.put_hash(pair);
}

#[test]
fn view_chain_drops_and_appends_blocks() {
    let (state, keypair) = state_with(&[]);
    let genesis = state.snapshot().chain().last_block().block.as_ref().clone();
    let delta = LedgerTime::from_millis(1000);
    let b2 = create_child_block(&keypair, &genesis, delta, 1, vec![]);
    let b3 = create_child_block(&keypair, &b2, delta, 1, vec![]);

    let mut view = state.create_view();
    view.push_block(b2.clone(), ChainScore::new(1));
    view.push_block(b3.clone(), ChainScore::new(1));
    state.commit(view).unwrap();
    let snapshot = state.snapshot();
    assert_eq!(snapshot.chain().height(), BlockHeight::new(3));
    assert_eq!(snapshot.chain().score(), ChainScore::new(3));
    assert_eq!(snapshot.chain().height_of(&b3.hash()), Some(BlockHeight::new(3)));

    let mut view = state.create_view();
    let dropped = view.drop_blocks_after(BlockHeight::GENESIS);
    let dropped: Vec<Hash> = dropped.iter().map(|stored| stored.block.hash()).collect();
    assert_eq!(dropped, vec![b3.hash(), b2.hash()]);
    assert_eq!(view.height(), BlockHeight::GENESIS);
    assert_eq!(view.height_of(&b2.hash()), None);

    let fork = create_child_block(&keypair, &genesis, LedgerTime::from_millis(500), 5, vec![]);
    view.push_block(fork.clone(), ChainScore::new(5));
    assert_eq!(view.block_at(BlockHeight::new(2)).unwrap().block.hash(), fork.hash());
    assert_eq!(
        view.hashes_from(BlockHeight::GENESIS, 10).hashes(),
        &[genesis.hash(), fork.hash()]
    );
    state.commit(view).unwrap();

    let snapshot = state.snapshot();
    assert_eq!(snapshot.chain().height(), BlockHeight::new(2));
    assert_eq!(snapshot.chain().score(), ChainScore::new(6));
    assert_eq!(snapshot.chain().height_of(&b2.hash()), None);
}

#[test]
fn genesis_must_be_at_genesis_height() {
    let keypair = KeyPair::generate();
    let block = create_block(
        &keypair,
        Hash::zero(),
        BlockHeight::new(2),
        LedgerTime::from_millis(0),
        1,
        vec![],
    );
    assert_matches!(
        LedgerState::new(LedgerStateConfig::default(), block, ChainScore::ZERO, vec![]).err(),
        Some(LedgerStateError::InvalidGenesis(_))
    );
}

#[test]
fn snapshot_answers_forwarded_lookups() {
    let alice = random_address();
    let (state, _) = state_with(&[(alice, 1)]);
    let snapshot = state.snapshot();
    assert_eq!(
        snapshot.find_forwarded_address(&alice, BlockHeight::new(2)),
        alice
    );
}
