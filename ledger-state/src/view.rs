// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! The state view is a private, disposable overlay over one committed snapshot.
//! It never writes to the snapshot but keeps track of every change applied to it,
//! so that the whole set of changes can be committed at once or dropped.

use crate::account_state::AccountState;
use crate::cache::{AccountStateCache, ReadOnlyAccountStateCache, TransactionHashCache};
use crate::chain::{ChainLookup, StoredBlock};
use crate::config::LedgerStateConfig;
use crate::store::LedgerSnapshot;
use ledger_hash::Hash;
use ledger_models::notification::{HashMetaData, TransactionHashPair};
use ledger_models::{Address, Block, BlockHeight, ChainScore};
use std::collections::HashMap;
use std::sync::Arc;

/// Copy-on-write view over a committed snapshot
pub struct StateView {
    /// snapshot the view was created from. For reading only.
    pub(crate) base: Arc<LedgerSnapshot>,
    /// ledger state configuration
    config: LedgerStateConfig,
    /// changed accounts, `None` when removed
    pub(crate) accounts: HashMap<Address, Option<AccountState>>,
    /// changed transaction hashes, `None` when removed
    pub(crate) hashes: HashMap<Hash, Option<HashMetaData>>,
    /// base blocks above this height are dropped
    pub(crate) truncated_to: Option<BlockHeight>,
    /// blocks pushed on top of the retained base blocks
    pub(crate) appended: Vec<StoredBlock>,
}

impl StateView {
    pub(crate) fn new(base: Arc<LedgerSnapshot>, config: LedgerStateConfig) -> Self {
        StateView {
            base,
            config,
            accounts: HashMap::new(),
            hashes: HashMap::new(),
            truncated_to: None,
            appended: Vec::new(),
        }
    }

    /// Generation of the snapshot the view was created from
    pub fn base_generation(&self) -> u64 {
        self.base.generation()
    }

    /// Balance of `address` as seen by the view
    pub fn balance_of(&self, address: &Address) -> ledger_models::Amount {
        self.find_state(address)
            .map(|state| state.balance)
            .unwrap_or_default()
    }

    /// Whether the view changed anything
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.hashes.is_empty()
            && self.truncated_to.is_none()
            && self.appended.is_empty()
    }

    /// Height of the highest base block still part of the view's chain
    fn base_top(&self) -> BlockHeight {
        let base_height = self.base.chain().height();
        match self.truncated_to {
            Some(height) => height.min(base_height),
            None => base_height,
        }
    }

    /// Removes every block above `height` from the view's chain.
    ///
    /// Returns the removed blocks, tip first. The genesis block is never removed.
    pub fn drop_blocks_after(&mut self, height: BlockHeight) -> Vec<StoredBlock> {
        let height = height.max(BlockHeight::GENESIS);
        let mut removed = Vec::new();
        while self
            .appended
            .last()
            .map_or(false, |stored| stored.block.height() > height)
        {
            if let Some(stored) = self.appended.pop() {
                removed.push(stored);
            }
        }
        let base_top = self.base_top();
        if height < base_top {
            let mut current = base_top;
            while current > height {
                if let Some(stored) = self.base.chain().block_at(current) {
                    removed.push(stored.clone());
                }
                current = match current.prev() {
                    Some(prev) => prev,
                    None => break,
                };
            }
            self.truncated_to = Some(height);
        }
        removed
    }

    /// Appends `block` with its `score` on top of the view's chain.
    ///
    /// # Panics
    /// When the block does not extend the tip.
    pub fn push_block(&mut self, block: Block, score: ChainScore) {
        let tip = self.last_block();
        assert!(
            block.height() == tip.block.height().next()
                && block.content.previous_block_hash == tip.block.hash(),
            "block {} at height {} does not extend tip {}",
            block.hash(),
            block.height(),
            tip.block.hash()
        );
        let cumulative_score = tip.cumulative_score.saturating_add(score);
        self.appended.push(StoredBlock {
            block: Arc::new(block),
            score,
            cumulative_score,
        });
    }
}

impl ChainLookup for StateView {
    fn block_at(&self, height: BlockHeight) -> Option<&StoredBlock> {
        let base_top = self.base_top();
        if height <= base_top {
            return self.base.chain().block_at(height);
        }
        let offset = usize::try_from(height.checked_sub(base_top)?).ok()?;
        self.appended.get(offset.checked_sub(1)?)
    }

    fn height_of(&self, hash: &Hash) -> Option<BlockHeight> {
        if let Some(stored) = self.appended.iter().find(|stored| stored.block.hash() == *hash) {
            return Some(stored.block.height());
        }
        self.base
            .chain()
            .height_of(hash)
            .filter(|height| *height <= self.base_top())
    }

    fn last_block(&self) -> &StoredBlock {
        match self.appended.last() {
            Some(stored) => stored,
            None => self
                .base
                .chain()
                .block_at(self.base_top())
                .unwrap_or_else(|| self.base.chain().last_block()),
        }
    }
}

impl ReadOnlyAccountStateCache for StateView {
    fn find_state(&self, address: &Address) -> Option<&AccountState> {
        match self.accounts.get(address) {
            Some(changed) => changed.as_ref(),
            None => self.base.account(address),
        }
    }

    fn remote_harvesting_delay(&self) -> u64 {
        self.config.remote_harvesting_delay
    }
}

impl AccountStateCache for StateView {
    fn find_state_mut(&mut self, address: &Address) -> &mut AccountState {
        let base = &self.base;
        self.accounts
            .entry(*address)
            .or_insert_with(|| base.account(address).cloned())
            .get_or_insert_with(|| AccountState::new(*address))
    }

    fn remove_state(&mut self, address: &Address) {
        self.accounts.insert(*address, None);
    }
}

impl TransactionHashCache for StateView {
    fn get_hash(&self, hash: &Hash) -> Option<HashMetaData> {
        match self.hashes.get(hash) {
            Some(changed) => *changed,
            None => self.base.get_hash(hash),
        }
    }

    fn put_hash(&mut self, pair: TransactionHashPair) {
        if self.contains_hash(&pair.hash) {
            panic!("transaction hash {} is already confirmed", pair.hash);
        }
        self.hashes.insert(pair.hash, Some(pair.meta_data));
    }

    fn remove_hash(&mut self, hash: &Hash) {
        if !self.contains_hash(hash) {
            panic!("transaction hash {} is not confirmed", hash);
        }
        if self.base.get_hash(hash).is_some() {
            self.hashes.insert(*hash, None);
        } else {
            self.hashes.remove(hash);
        }
    }

    fn prune_hashes(&mut self, height: BlockHeight) {
        self.hashes.retain(|_, meta_data| match meta_data {
            Some(meta_data) => meta_data.height >= height,
            None => true,
        });
        let expired: Vec<Hash> = self
            .base
            .hashes()
            .filter(|(_, meta_data)| meta_data.height < height)
            .map(|(hash, _)| *hash)
            .collect();
        for hash in expired {
            self.hashes.insert(hash, None);
        }
    }
}
