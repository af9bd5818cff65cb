// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Authoritative ledger state.
//!
//! The committed state is an immutable `LedgerSnapshot` behind an `Arc`.
//! Writers work on a `StateView` and publish it with `LedgerState::commit`,
//! which swaps in a new snapshot in one step: readers see either the old or
//! the new snapshot, never a mix.

use crate::account_state::AccountState;
use crate::cache::ReadOnlyAccountStateCache;
use crate::chain::{BlockChain, ChainLookup};
use crate::config::LedgerStateConfig;
use crate::error::LedgerStateError;
use crate::view::StateView;
use ledger_hash::Hash;
use ledger_logging::ledger_trace;
use ledger_models::notification::HashMetaData;
use ledger_models::{Address, Amount, Block, BlockHeight, ChainScore};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Immutable committed state
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    generation: u64,
    remote_harvesting_delay: u64,
    accounts: HashMap<Address, AccountState>,
    transaction_hashes: HashMap<Hash, HashMetaData>,
    chain: BlockChain,
}

impl LedgerSnapshot {
    /// Number of commits that led to this snapshot
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// State of a known account
    pub fn account(&self, address: &Address) -> Option<&AccountState> {
        self.accounts.get(address)
    }

    /// Balance of `address`, zero for unknown accounts
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.accounts
            .get(address)
            .map(|state| state.balance)
            .unwrap_or_default()
    }

    /// All known accounts
    pub fn accounts(&self) -> impl Iterator<Item = &AccountState> {
        self.accounts.values()
    }

    /// Metadata of a confirmed transaction hash
    pub fn get_hash(&self, hash: &Hash) -> Option<HashMetaData> {
        self.transaction_hashes.get(hash).copied()
    }

    /// Whether a transaction hash is confirmed
    pub fn contains_hash(&self, hash: &Hash) -> bool {
        self.transaction_hashes.contains_key(hash)
    }

    /// All confirmed transaction hashes
    pub fn hashes(&self) -> impl Iterator<Item = (&Hash, &HashMetaData)> {
        self.transaction_hashes.iter()
    }

    /// Local chain
    pub fn chain(&self) -> &BlockChain {
        &self.chain
    }

    /// Builds the snapshot following `self` with the changes of `view` applied
    fn apply(&self, view: StateView) -> LedgerSnapshot {
        let mut next = self.clone();
        next.generation = self.generation + 1;
        for (address, state) in view.accounts {
            match state {
                Some(state) if !state.is_pristine() => {
                    next.accounts.insert(address, state);
                }
                _ => {
                    next.accounts.remove(&address);
                }
            }
        }
        for (hash, meta_data) in view.hashes {
            match meta_data {
                Some(meta_data) => {
                    next.transaction_hashes.insert(hash, meta_data);
                }
                None => {
                    next.transaction_hashes.remove(&hash);
                }
            }
        }
        if let Some(height) = view.truncated_to {
            next.chain.truncate(height);
        }
        for stored in view.appended {
            next.chain.push(stored);
        }
        next
    }
}

impl ReadOnlyAccountStateCache for LedgerSnapshot {
    fn find_state(&self, address: &Address) -> Option<&AccountState> {
        self.accounts.get(address)
    }

    fn remote_harvesting_delay(&self) -> u64 {
        self.remote_harvesting_delay
    }
}

/// Shared, versioned ledger state
pub struct LedgerState {
    /// ledger state configuration
    config: LedgerStateConfig,
    /// current committed snapshot
    current: RwLock<Arc<LedgerSnapshot>>,
    /// serializes commits
    commit_lock: Mutex<()>,
}

impl LedgerState {
    /// Creates the state from a genesis block and the initial account allocations
    pub fn new(
        config: LedgerStateConfig,
        genesis: Block,
        genesis_score: ChainScore,
        initial_accounts: impl IntoIterator<Item = AccountState>,
    ) -> Result<Self, LedgerStateError> {
        if genesis.height() != BlockHeight::GENESIS {
            return Err(LedgerStateError::InvalidGenesis(format!(
                "genesis height is {}, expected {}",
                genesis.height(),
                BlockHeight::GENESIS
            )));
        }
        if !genesis.content.transactions.is_empty() {
            return Err(LedgerStateError::InvalidGenesis(
                "genesis block cannot carry transactions".to_string(),
            ));
        }
        let accounts = initial_accounts
            .into_iter()
            .filter(|state| !state.is_pristine())
            .map(|state| (state.address, state))
            .collect();
        let snapshot = LedgerSnapshot {
            generation: 0,
            remote_harvesting_delay: config.remote_harvesting_delay,
            accounts,
            transaction_hashes: HashMap::new(),
            chain: BlockChain::new(genesis, genesis_score),
        };
        Ok(LedgerState {
            config,
            current: RwLock::new(Arc::new(snapshot)),
            commit_lock: Mutex::new(()),
        })
    }

    /// Current committed snapshot
    pub fn snapshot(&self) -> Arc<LedgerSnapshot> {
        self.current.read().clone()
    }

    /// Fresh private view over the current snapshot
    pub fn create_view(&self) -> StateView {
        StateView::new(self.snapshot(), self.config.clone())
    }

    /// Publishes the changes of `view` as the new authoritative state.
    ///
    /// Fails with `StaleView` if another commit happened since the view was created;
    /// the view is then dropped and the state is left untouched.
    /// Returns the new generation.
    pub fn commit(&self, view: StateView) -> Result<u64, LedgerStateError> {
        let _guard = self.commit_lock.lock();
        let current = self.snapshot();
        if !Arc::ptr_eq(&current, &view.base) {
            return Err(LedgerStateError::StaleView {
                view: view.base_generation(),
                current: current.generation(),
            });
        }
        let next = Arc::new(current.apply(view));
        let generation = next.generation();
        let height = next.chain().height();
        *self.current.write() = next;
        debug!("ledger state committed generation {} at height {}", generation, height);
        ledger_trace!("ledger_state.commit", { "generation": generation, "height": height.to_u64() });
        Ok(generation)
    }
}
