// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Access traits over the account-state and transaction-hash stores.

use crate::account_state::{AccountState, RemoteLinkOwner};
use ledger_hash::Hash;
use ledger_models::notification::{HashMetaData, TransactionHashPair};
use ledger_models::transaction::ImportanceTransferMode;
use ledger_models::{Address, BlockHeight};

/// Read access to account states
pub trait ReadOnlyAccountStateCache {
    /// State of `address`, `None` if the account is unknown
    fn find_state(&self, address: &Address) -> Option<&AccountState>;

    /// Blocks an importance transfer needs before it affects forwarding
    fn remote_harvesting_delay(&self) -> u64;

    /// State of the account that really harvests for `address` at `height`.
    ///
    /// Only links confirmed below `height` count, so a block never changes its own
    /// harvester. A remote harvester forwards to its lessor once an activation is at
    /// least `remote_harvesting_delay` blocks old, and keeps forwarding until a
    /// deactivation reaches that age. Any other account forwards to itself.
    fn find_forwarded_state(&self, address: &Address, height: BlockHeight) -> Option<&AccountState> {
        let state = self.find_state(address)?;
        if let Some(link) = state.remote_links.current_before(height) {
            if link.owner == RemoteLinkOwner::RemoteHarvester {
                let age = height.checked_sub(link.height).unwrap_or(0);
                let effective = age >= self.remote_harvesting_delay();
                let forwards = match link.mode {
                    ImportanceTransferMode::Activate => effective,
                    ImportanceTransferMode::Deactivate => !effective,
                };
                if forwards {
                    return self.find_state(&link.linked_address);
                }
            }
        }
        Some(state)
    }

    /// Address of the account that really harvests for `address` at `height`
    fn find_forwarded_address(&self, address: &Address, height: BlockHeight) -> Address {
        self.find_forwarded_state(address, height)
            .map(|state| state.address)
            .unwrap_or(*address)
    }
}

/// Height-scoped read/write access to account states
pub trait AccountStateCache: ReadOnlyAccountStateCache {
    /// Mutable state of `address`, created fresh if the account is unknown
    fn find_state_mut(&mut self, address: &Address) -> &mut AccountState;

    /// Forgets `address`
    fn remove_state(&mut self, address: &Address);
}

/// Confirmed transaction hashes
pub trait TransactionHashCache {
    /// Metadata of a confirmed hash
    fn get_hash(&self, hash: &Hash) -> Option<HashMetaData>;

    /// Whether `hash` is confirmed
    fn contains_hash(&self, hash: &Hash) -> bool {
        self.get_hash(hash).is_some()
    }

    /// Registers a confirmed hash. Panics if it is already registered.
    fn put_hash(&mut self, pair: TransactionHashPair);

    /// Unregisters a hash. Panics if it is not registered.
    fn remove_hash(&mut self, hash: &Hash);

    /// Drops every hash confirmed below `height`
    fn prune_hashes(&mut self, height: BlockHeight);
}

/// Everything block execution needs to mutate
pub trait StateCache: AccountStateCache + TransactionHashCache {}

impl<T: AccountStateCache + TransactionHashCache> StateCache for T {}
