// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Per-account ledger state.

use ledger_models::transaction::ImportanceTransferMode;
use ledger_models::{Address, Amount, BlockHeight};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Side of a remote harvesting link an account is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteLinkOwner {
    /// the account lent its importance to `linked_address`
    HarvestingRemotely,
    /// the account harvests on behalf of `linked_address`
    RemoteHarvester,
}

/// One importance transfer, as seen from one of its two accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteLink {
    /// the other account of the link
    pub linked_address: Address,
    /// height of the block that confirmed the transfer
    pub height: BlockHeight,
    /// activation or deactivation
    pub mode: ImportanceTransferMode,
    /// side of the link
    pub owner: RemoteLinkOwner,
}

/// Stack of remote harvesting links, most recent on top
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLinks(Vec<RemoteLink>);

impl RemoteLinks {
    /// Most recent link
    pub fn current(&self) -> Option<&RemoteLink> {
        self.0.last()
    }

    /// Most recent link confirmed strictly below `height`
    pub fn current_before(&self, height: BlockHeight) -> Option<&RemoteLink> {
        self.0.iter().rev().find(|link| link.height < height)
    }

    /// Whether there is no link at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the most recent link makes this account harvest for someone else
    pub fn is_remote_harvester(&self) -> bool {
        matches!(self.current(), Some(link) if link.owner == RemoteLinkOwner::RemoteHarvester)
    }

    /// Whether the most recent link lends this account's importance
    pub fn is_harvesting_remotely(&self) -> bool {
        matches!(self.current(), Some(link) if link.owner == RemoteLinkOwner::HarvestingRemotely)
    }

    /// Pushes a link
    pub fn add_link(&mut self, link: RemoteLink) {
        self.0.push(link);
    }

    /// Pops `link`, which must be the most recent one.
    ///
    /// # Panics
    /// When `link` is not on top, which means it is undone out of order.
    pub fn remove_link(&mut self, link: &RemoteLink) {
        match self.0.last() {
            Some(top) if top == link => {
                self.0.pop();
            }
            top => panic!(
                "cannot remove remote link {:?}: most recent link is {:?}",
                link, top
            ),
        }
    }
}

/// Cosignatory relations of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigLinks {
    /// cosignatories of this account, when it is a multisig account
    cosignatories: BTreeSet<Address>,
    /// multisig accounts this account cosigns for
    cosignatory_of: BTreeSet<Address>,
}

impl MultisigLinks {
    /// Whether this account is a multisig account
    pub fn is_multisig(&self) -> bool {
        !self.cosignatories.is_empty()
    }

    /// Whether `address` cosigns for this account
    pub fn is_cosignatory(&self, address: &Address) -> bool {
        self.cosignatories.contains(address)
    }

    /// Whether this account cosigns for `multisig`
    pub fn is_cosignatory_of(&self, multisig: &Address) -> bool {
        self.cosignatory_of.contains(multisig)
    }

    /// Cosignatories of this account
    pub fn cosignatories(&self) -> &BTreeSet<Address> {
        &self.cosignatories
    }

    /// Whether there is no relation at all
    pub fn is_empty(&self) -> bool {
        self.cosignatories.is_empty() && self.cosignatory_of.is_empty()
    }

    /// Registers `cosignatory` as a cosignatory of this account. Panics if it already is one.
    pub fn add_cosignatory(&mut self, cosignatory: Address) {
        if !self.cosignatories.insert(cosignatory) {
            panic!("{} is already a cosignatory", cosignatory);
        }
    }

    /// Unregisters `cosignatory`. Panics if it is not a cosignatory.
    pub fn remove_cosignatory(&mut self, cosignatory: &Address) {
        if !self.cosignatories.remove(cosignatory) {
            panic!("{} is not a cosignatory", cosignatory);
        }
    }

    /// Registers this account as a cosignatory of `multisig`. Panics if it already is one.
    pub fn add_cosignatory_of(&mut self, multisig: Address) {
        if !self.cosignatory_of.insert(multisig) {
            panic!("already a cosignatory of {}", multisig);
        }
    }

    /// Unregisters this account as a cosignatory of `multisig`. Panics if it is not one.
    pub fn remove_cosignatory_of(&mut self, multisig: &Address) {
        if !self.cosignatory_of.remove(multisig) {
            panic!("not a cosignatory of {}", multisig);
        }
    }
}

/// Importance values computed by the external weighting, by height
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountImportance(BTreeMap<BlockHeight, u64>);

impl AccountImportance {
    /// Records the importance computed at `height`
    pub fn set_importance(&mut self, height: BlockHeight, importance: u64) {
        self.0.insert(height, importance);
    }

    /// Most recent importance computed at or below `height`
    pub fn importance_at(&self, height: BlockHeight) -> Option<u64> {
        self.0.range(..=height).next_back().map(|(_, value)| *value)
    }

    /// Whether no importance was ever computed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Bookkeeping about an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// number of confirmed transactions referencing the account
    pub reference_count: u64,
    /// height at which the account was first referenced
    pub height_seen: Option<BlockHeight>,
    /// number of blocks whose fees went to the account
    pub harvested_blocks: u64,
    /// total fees received as harvest rewards
    pub harvested_fees: Amount,
}

/// Complete state of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// the account
    pub address: Address,
    /// spendable balance
    pub balance: Amount,
    /// importance history
    pub importance: AccountImportance,
    /// remote harvesting links
    pub remote_links: RemoteLinks,
    /// cosignatory relations
    pub multisig_links: MultisigLinks,
    /// bookkeeping
    pub info: AccountInfo,
}

impl AccountState {
    /// Fresh state of an unknown account
    pub fn new(address: Address) -> Self {
        AccountState {
            address,
            balance: Amount::zero(),
            importance: AccountImportance::default(),
            remote_links: RemoteLinks::default(),
            multisig_links: MultisigLinks::default(),
            info: AccountInfo::default(),
        }
    }

    /// State of an account created with a balance (genesis allocation)
    pub fn with_balance(address: Address, balance: Amount) -> Self {
        AccountState {
            balance,
            ..AccountState::new(address)
        }
    }

    /// Whether the state is indistinguishable from an unknown account.
    /// Pristine accounts are not kept by the ledger state.
    pub fn is_pristine(&self) -> bool {
        *self == AccountState::new(self.address)
    }

    /// Adds `amount` to the balance.
    ///
    /// # Panics
    /// On overflow.
    pub fn credit(&mut self, amount: Amount) {
        self.balance = self.balance.checked_add(amount).unwrap_or_else(|| {
            panic!(
                "crediting {} to {} overflows balance {}",
                amount, self.address, self.balance
            )
        });
    }

    /// Removes `amount` from the balance.
    ///
    /// # Panics
    /// When the balance would become negative: such debits must be rejected by validation.
    pub fn debit(&mut self, amount: Amount) {
        self.balance = self.balance.checked_sub(amount).unwrap_or_else(|| {
            panic!(
                "debiting {} from {} would make balance {} negative",
                amount, self.address, self.balance
            )
        });
    }
}
