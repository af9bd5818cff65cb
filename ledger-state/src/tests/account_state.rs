// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{
    AccountImportance, AccountState, AccountStateCache, LedgerState, LedgerStateConfig,
    ReadOnlyAccountStateCache, RemoteLink, RemoteLinkOwner, RemoteLinks,
};
use ledger_hash::Hash;
use ledger_models::test_exports::{create_block, random_address};
use ledger_models::transaction::ImportanceTransferMode;
use ledger_models::{Address, Amount, BlockHeight, ChainScore};
use ledger_signature::KeyPair;
use ledger_time::LedgerTime;

fn empty_state(delay: u64) -> LedgerState {
    let genesis = create_block(
        &KeyPair::generate(),
        Hash::zero(),
        BlockHeight::GENESIS,
        LedgerTime::from_millis(0),
        1,
        vec![],
    );
    LedgerState::new(
        LedgerStateConfig {
            remote_harvesting_delay: delay,
        },
        genesis,
        ChainScore::new(1),
        vec![],
    )
    .unwrap()
}

fn link(lessor: Address, lessee: Address, height: u64, mode: ImportanceTransferMode) -> (RemoteLink, RemoteLink) {
    (
        RemoteLink {
            linked_address: lessee,
            height: BlockHeight::new(height),
            mode,
            owner: RemoteLinkOwner::HarvestingRemotely,
        },
        RemoteLink {
            linked_address: lessor,
            height: BlockHeight::new(height),
            mode,
            owner: RemoteLinkOwner::RemoteHarvester,
        },
    )
}

#[test]
fn forwarded_account_follows_activation_delay() {
    let state = empty_state(3);
    let mut view = state.create_view();
    let lessor = random_address();
    let lessee = random_address();
    let (lessor_link, lessee_link) = link(lessor, lessee, 10, ImportanceTransferMode::Activate);
    view.find_state_mut(&lessor).remote_links.add_link(lessor_link);
    view.find_state_mut(&lessee).remote_links.add_link(lessee_link);

    assert_eq!(view.find_forwarded_address(&lessee, BlockHeight::new(12)), lessee);
    assert_eq!(view.find_forwarded_address(&lessee, BlockHeight::new(13)), lessor);
    // the lessor itself is never forwarded
    assert_eq!(view.find_forwarded_address(&lessor, BlockHeight::new(20)), lessor);
}

#[test]
fn forwarded_account_follows_deactivation_delay() {
    let state = empty_state(3);
    let mut view = state.create_view();
    let lessor = random_address();
    let lessee = random_address();
    let (lessor_link, lessee_link) = link(lessor, lessee, 20, ImportanceTransferMode::Deactivate);
    view.find_state_mut(&lessor).remote_links.add_link(lessor_link);
    view.find_state_mut(&lessee).remote_links.add_link(lessee_link);

    assert_eq!(view.find_forwarded_address(&lessee, BlockHeight::new(22)), lessor);
    assert_eq!(view.find_forwarded_address(&lessee, BlockHeight::new(23)), lessee);
}

#[test]
fn unknown_account_forwards_to_itself() {
    let state = empty_state(3);
    let view = state.create_view();
    let address = random_address();
    assert!(view.find_forwarded_state(&address, BlockHeight::new(5)).is_none());
    assert_eq!(view.find_forwarded_address(&address, BlockHeight::new(5)), address);
}

#[test]
#[should_panic(expected = "cannot remove remote link")]
fn remote_links_are_removed_in_stack_order() {
    let lessor = random_address();
    let (first, _) = link(lessor, random_address(), 1, ImportanceTransferMode::Activate);
    let (second, _) = link(lessor, random_address(), 2, ImportanceTransferMode::Deactivate);
    let mut links = RemoteLinks::default();
    links.add_link(first);
    links.add_link(second);
    links.remove_link(&first);
}

#[test]
#[should_panic(expected = "negative")]
fn debit_below_zero_is_fatal() {
    let mut account = AccountState::with_balance(random_address(), Amount::from_raw(5));
    account.debit(Amount::from_raw(6));
}

#[test]
fn importance_lookup_uses_latest_value_at_height() {
    let mut importance = AccountImportance::default();
    importance.set_importance(BlockHeight::new(10), 7);
    importance.set_importance(BlockHeight::new(20), 9);
    assert_eq!(importance.importance_at(BlockHeight::new(5)), None);
    assert_eq!(importance.importance_at(BlockHeight::new(15)), Some(7));
    assert_eq!(importance.importance_at(BlockHeight::new(25)), Some(9));
}
