// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Notification consumers and their compositions.

use crate::address::Address;
use crate::amount::Amount;
use crate::notification::{BlockNotificationContext, Notification};
use tracing::warn;

/// Consumes notifications emitted by transactions.
///
/// `notify` cannot fail for well-formed input: an effect that cannot be applied is an
/// invariant violation and panics.
pub trait TransactionObserver {
    /// Handles one notification
    fn notify(&mut self, notification: &Notification);
}

/// Consumes notifications emitted while a block is executed or undone.
pub trait BlockTransactionObserver {
    /// Handles one notification in the context of its block pass
    fn notify(&mut self, notification: &Notification, context: &BlockNotificationContext);
}

/// Narrow observer only interested in balance movements.
pub trait TransferObserver {
    /// `amount` moves from `sender` to `recipient`; by default a debit followed by a credit
    fn notify_transfer(&mut self, sender: &Address, recipient: &Address, amount: Amount) {
        self.notify_debit(sender, amount);
        self.notify_credit(recipient, amount);
    }

    /// `amount` is added to `account`
    fn notify_credit(&mut self, account: &Address, amount: Amount);

    /// `amount` is removed from `account`
    fn notify_debit(&mut self, account: &Address, amount: Amount);
}

/// Binds a block context to a `BlockTransactionObserver` so it can be handed to transactions.
pub struct BlockTransactionObserverAdapter<'a, O: BlockTransactionObserver + ?Sized> {
    observer: &'a mut O,
    context: BlockNotificationContext,
}

impl<'a, O: BlockTransactionObserver + ?Sized> BlockTransactionObserverAdapter<'a, O> {
    /// Wraps `observer`, tagging every notification with `context`
    pub fn new(observer: &'a mut O, context: BlockNotificationContext) -> Self {
        BlockTransactionObserverAdapter { observer, context }
    }
}

impl<O: BlockTransactionObserver + ?Sized> TransactionObserver
    for BlockTransactionObserverAdapter<'_, O>
{
    fn notify(&mut self, notification: &Notification) {
        self.observer.notify(notification, &self.context);
    }
}

/// Forwards balance notifications to a `TransferObserver` and ignores the rest.
pub struct TransferObserverAdapter<'a, O: TransferObserver + ?Sized>(&'a mut O);

impl<'a, O: TransferObserver + ?Sized> TransferObserverAdapter<'a, O> {
    /// Wraps `observer`
    pub fn new(observer: &'a mut O) -> Self {
        TransferObserverAdapter(observer)
    }
}

impl<O: TransferObserver + ?Sized> TransactionObserver for TransferObserverAdapter<'_, O> {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::BalanceTransfer {
                sender,
                recipient,
                amount,
            } => self.0.notify_transfer(sender, recipient, *amount),
            Notification::BalanceCredit { account, amount } => {
                self.0.notify_credit(account, *amount)
            }
            Notification::BalanceDebit { account, amount } => self.0.notify_debit(account, *amount),
            Notification::AccountSeen { .. }
            | Notification::CosignatoryModification { .. }
            | Notification::ImportanceTransfer { .. }
            | Notification::TransactionHashes { .. }
            | Notification::HarvestReward { .. } => {}
        }
    }
}

/// Delivers every notification to several observers, in registration order.
#[derive(Default)]
pub struct AggregateBlockTransactionObserver<'a> {
    observers: Vec<&'a mut dyn BlockTransactionObserver>,
}

impl<'a> AggregateBlockTransactionObserver<'a> {
    /// Empty aggregate
    pub fn new() -> Self {
        AggregateBlockTransactionObserver {
            observers: Vec::new(),
        }
    }

    /// Appends an observer; it is notified after the ones already registered
    #[must_use]
    pub fn with(mut self, observer: &'a mut dyn BlockTransactionObserver) -> Self {
        self.observers.push(observer);
        self
    }
}

impl BlockTransactionObserver for AggregateBlockTransactionObserver<'_> {
    fn notify(&mut self, notification: &Notification, context: &BlockNotificationContext) {
        for observer in self.observers.iter_mut() {
            observer.notify(notification, context);
        }
    }
}

/// Buffers notifications and, on `commit`, replays them to the wrapped observer in
/// reverse arrival order with balance effects flipped (see `Notification::reversed`).
///
/// Used to undo a transaction by running its forward execution through this wrapper.
/// A fresh instance is built for each undo pass; `commit` consumes it.
pub struct ReverseTransactionObserver<'a, O: TransactionObserver + ?Sized> {
    observer: &'a mut O,
    pending: Vec<Notification>,
}

impl<'a, O: TransactionObserver + ?Sized> ReverseTransactionObserver<'a, O> {
    /// Wraps `observer`
    pub fn new(observer: &'a mut O) -> Self {
        ReverseTransactionObserver {
            observer,
            pending: Vec::new(),
        }
    }

    /// Replays the buffered notifications to the wrapped observer
    pub fn commit(mut self) {
        let pending = std::mem::take(&mut self.pending);
        for notification in pending.iter().rev() {
            self.observer.notify(&notification.reversed());
        }
    }
}

impl<O: TransactionObserver + ?Sized> TransactionObserver for ReverseTransactionObserver<'_, O> {
    fn notify(&mut self, notification: &Notification) {
        self.pending.push(notification.clone());
    }
}

impl<O: TransactionObserver + ?Sized> Drop for ReverseTransactionObserver<'_, O> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            warn!(
                "reverse observer dropped with {} uncommitted notifications",
                self.pending.len()
            );
        }
    }
}
