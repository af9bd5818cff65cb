// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::address::Address;
use crate::amount::Amount;
use crate::notification::{BlockNotificationContext, Notification};
use crate::observer::{BlockTransactionObserver, TransactionObserver, TransferObserver};

/// Remembers every notification it receives
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// received notifications, in arrival order
    pub notifications: Vec<Notification>,
}

impl TransactionObserver for RecordingObserver {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

/// Remembers every notification it receives with its block context
#[derive(Debug, Default)]
pub struct RecordingBlockObserver {
    /// received notifications, in arrival order
    pub notifications: Vec<(Notification, BlockNotificationContext)>,
}

impl RecordingBlockObserver {
    /// Notifications without their contexts
    pub fn kinds(&self) -> Vec<Notification> {
        self.notifications.iter().map(|(n, _)| n.clone()).collect()
    }
}

impl BlockTransactionObserver for RecordingBlockObserver {
    fn notify(&mut self, notification: &Notification, context: &BlockNotificationContext) {
        self.notifications.push((notification.clone(), *context));
    }
}

/// Remembers credits and debits in arrival order
#[derive(Debug, Default)]
pub struct RecordingTransferObserver {
    /// `(account, amount, is_credit)`
    pub movements: Vec<(Address, Amount, bool)>,
}

impl TransferObserver for RecordingTransferObserver {
    fn notify_credit(&mut self, account: &Address, amount: Amount) {
        self.movements.push((*account, amount, true));
    }

    fn notify_debit(&mut self, account: &Address, amount: Amount) {
        self.movements.push((*account, amount, false));
    }
}
