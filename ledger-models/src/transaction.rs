// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::address::Address;
use crate::amount::Amount;
use crate::notification::Notification;
use crate::observer::{ReverseTransactionObserver, TransactionObserver};
use crate::secure_share::{SecureShare, SecureShareContent};
use ledger_time::LedgerTime;
use serde::{Deserialize, Serialize};

/// Whether an importance transfer starts or stops remote harvesting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportanceTransferMode {
    /// delegate harvesting to the remote account
    Activate,
    /// take harvesting back from the remote account
    Deactivate,
}

/// Whether a cosignatory joins or leaves a multisig account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CosignatoryModificationKind {
    /// add the cosignatory
    Add,
    /// remove the cosignatory
    Del,
}

/// A single change to the cosignatories of a multisig account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CosignatoryModification {
    /// add or remove
    pub kind: CosignatoryModificationKind,
    /// the cosignatory account
    pub cosignatory: Address,
}

/// Kind-specific payload of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// move coins to `recipient`
    Transfer {
        /// credited account
        recipient: Address,
        /// moved amount
        amount: Amount,
    },
    /// delegate or revoke harvesting rights
    ImportanceTransfer {
        /// remote harvesting account
        remote: Address,
        /// activation or deactivation
        mode: ImportanceTransferMode,
    },
    /// change the cosignatories of the signer's multisig account
    MultisigModification {
        /// changes, applied in order
        modifications: Vec<CosignatoryModification>,
    },
}

/// Unsigned transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionContent {
    /// fee paid to the harvester of the including block
    pub fee: Amount,
    /// creation time
    pub timestamp: LedgerTime,
    /// the transaction cannot be included in a block created after this time
    pub deadline: LedgerTime,
    /// kind-specific payload
    pub kind: TransactionKind,
}

impl SecureShareContent for TransactionContent {}

/// Signed transaction
pub type Transaction = SecureShare<TransactionContent>;

impl Transaction {
    /// Account paying the fee
    pub fn signer(&self) -> Address {
        self.content_creator_address
    }

    /// Fee of the transaction
    pub fn fee(&self) -> Amount {
        self.content.fee
    }

    /// Accounts referenced by the transaction besides its signer
    pub fn other_accounts(&self) -> Vec<Address> {
        match &self.content.kind {
            TransactionKind::Transfer { recipient, .. } => vec![*recipient],
            TransactionKind::ImportanceTransfer { remote, .. } => vec![*remote],
            TransactionKind::MultisigModification { modifications } => modifications
                .iter()
                .map(|modification| modification.cosignatory)
                .collect(),
        }
    }

    /// Emits the notifications applying this transaction.
    ///
    /// Secondary accounts are announced before the effect that references them,
    /// the fee debit comes last.
    pub fn execute(&self, observer: &mut dyn TransactionObserver) {
        let signer = self.signer();
        match &self.content.kind {
            TransactionKind::Transfer { recipient, amount } => {
                observer.notify(&Notification::AccountSeen {
                    account: *recipient,
                });
                observer.notify(&Notification::BalanceTransfer {
                    sender: signer,
                    recipient: *recipient,
                    amount: *amount,
                });
            }
            TransactionKind::ImportanceTransfer { remote, mode } => {
                observer.notify(&Notification::AccountSeen { account: *remote });
                observer.notify(&Notification::ImportanceTransfer {
                    lessor: signer,
                    lessee: *remote,
                    mode: *mode,
                });
            }
            TransactionKind::MultisigModification { modifications } => {
                for modification in modifications {
                    observer.notify(&Notification::AccountSeen {
                        account: modification.cosignatory,
                    });
                    observer.notify(&Notification::CosignatoryModification {
                        multisig: signer,
                        modification: *modification,
                    });
                }
            }
        }
        observer.notify(&Notification::BalanceDebit {
            account: signer,
            amount: self.fee(),
        });
    }

    /// Emits the notifications reverting this transaction: its execution, replayed
    /// backwards with balance effects flipped.
    pub fn undo(&self, observer: &mut dyn TransactionObserver) {
        let mut reverse = ReverseTransactionObserver::new(observer);
        self.execute(&mut reverse);
        reverse.commit();
    }
}
