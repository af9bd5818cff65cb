// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::StateEffect;
use ledger_models::notification::{BlockNotificationContext, Notification};
use ledger_models::observer::{TransactionObserver, TransferObserver, TransferObserverAdapter};
use ledger_models::{Address, Amount};
use ledger_state::StateCache;

/// Commits credits and debits to account balances
pub struct BalanceCommitObserver<'a> {
    cache: &'a mut dyn StateCache,
}

impl<'a> BalanceCommitObserver<'a> {
    /// Observer writing to `cache`
    pub fn new(cache: &'a mut dyn StateCache) -> Self {
        BalanceCommitObserver { cache }
    }
}

impl TransferObserver for BalanceCommitObserver<'_> {
    fn notify_credit(&mut self, account: &Address, amount: Amount) {
        self.cache.find_state_mut(account).credit(amount);
    }

    fn notify_debit(&mut self, account: &Address, amount: Amount) {
        self.cache.find_state_mut(account).debit(amount);
    }
}

/// Balance notifications. Undo passes need no special handling: their
/// balance notifications already come flipped.
pub struct BalanceEffect;

impl StateEffect for BalanceEffect {
    fn apply(
        &self,
        notification: &Notification,
        _context: &BlockNotificationContext,
        cache: &mut dyn StateCache,
    ) {
        let mut balances = BalanceCommitObserver::new(cache);
        TransferObserverAdapter::new(&mut balances).notify(notification);
    }
}
