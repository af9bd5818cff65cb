// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::address::Address;
use crate::amount::Amount;
use crate::height::BlockHeight;
use crate::transaction::{CosignatoryModification, ImportanceTransferMode};
use ledger_hash::Hash;
use ledger_time::LedgerTime;
use serde::{Deserialize, Serialize};

/// Where and when a confirmed transaction hash was included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashMetaData {
    /// height of the including block
    pub height: BlockHeight,
    /// timestamp of the transaction
    pub timestamp: LedgerTime,
}

/// A confirmed transaction hash and its metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHashPair {
    /// transaction hash
    pub hash: Hash,
    /// inclusion metadata
    pub meta_data: HashMetaData,
}

/// One ledger effect.
///
/// Notifications are the only channel through which shared ledger state is mutated.
/// They carry plain values and live for a single execute or undo pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// `amount` moves from `sender` to `recipient`
    BalanceTransfer {
        /// debited account
        sender: Address,
        /// credited account
        recipient: Address,
        /// moved amount
        amount: Amount,
    },
    /// `amount` is added to `account`
    BalanceCredit {
        /// credited account
        account: Address,
        /// added amount
        amount: Amount,
    },
    /// `amount` is removed from `account`
    BalanceDebit {
        /// debited account
        account: Address,
        /// removed amount
        amount: Amount,
    },
    /// `account` is referenced by a transaction
    AccountSeen {
        /// referenced account
        account: Address,
    },
    /// a cosignatory is added to or removed from `multisig`
    CosignatoryModification {
        /// the multisig account
        multisig: Address,
        /// the change
        modification: CosignatoryModification,
    },
    /// `lessor` delegates (or stops delegating) harvesting to `lessee`
    ImportanceTransfer {
        /// account owning the importance
        lessor: Address,
        /// remote harvesting account
        lessee: Address,
        /// activation or deactivation
        mode: ImportanceTransferMode,
    },
    /// transaction hashes confirmed by a block
    TransactionHashes {
        /// hashes with their metadata, in block order
        pairs: Vec<TransactionHashPair>,
    },
    /// `account` receives the fees of a block it harvested
    HarvestReward {
        /// beneficiary
        account: Address,
        /// total block fee
        amount: Amount,
    },
}

impl Notification {
    /// Notification that undoes a balance effect when replayed in reverse order.
    /// Every other kind is returned unchanged.
    ///
    /// ```
    /// # use ledger_models::notification::Notification;
    /// # use ledger_models::{address::Address, amount::Amount};
    /// # use ledger_signature::KeyPair;
    /// let account = Address::from_public_key(&KeyPair::generate().get_public_key());
    /// let credit = Notification::BalanceCredit { account, amount: Amount::from_raw(5) };
    /// assert_eq!(
    ///     credit.reversed(),
    ///     Notification::BalanceDebit { account, amount: Amount::from_raw(5) }
    /// );
    /// ```
    pub fn reversed(&self) -> Notification {
        match self {
            Notification::BalanceCredit { account, amount } => Notification::BalanceDebit {
                account: *account,
                amount: *amount,
            },
            Notification::BalanceDebit { account, amount } => Notification::BalanceCredit {
                account: *account,
                amount: *amount,
            },
            Notification::BalanceTransfer {
                sender,
                recipient,
                amount,
            } => Notification::BalanceTransfer {
                sender: *recipient,
                recipient: *sender,
                amount: *amount,
            },
            other => other.clone(),
        }
    }
}

/// Direction of the pass that produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationTrigger {
    /// block is being applied
    Execute,
    /// block is being reverted
    Undo,
}

/// Block-level context attached to every notification of a block pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockNotificationContext {
    /// height of the block
    pub height: BlockHeight,
    /// timestamp of the block
    pub timestamp: LedgerTime,
    /// direction of the pass
    pub trigger: NotificationTrigger,
}

impl BlockNotificationContext {
    /// Creates a context
    pub fn new(height: BlockHeight, timestamp: LedgerTime, trigger: NotificationTrigger) -> Self {
        BlockNotificationContext {
            height,
            timestamp,
            trigger,
        }
    }

    /// Whether the pass reverts the block
    pub fn is_undo(&self) -> bool {
        self.trigger == NotificationTrigger::Undo
    }
}
