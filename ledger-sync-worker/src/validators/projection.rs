// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_models::observer::TransferObserver;
use ledger_models::{Address, Amount};
use ledger_state::StateCache;
use std::collections::HashMap;

/// Balances as they would be after the transfers notified so far.
///
/// Starts from the balances of `state` and never writes to it.
pub(crate) struct BalanceProjection<'a> {
    state: &'a dyn StateCache,
    balances: HashMap<Address, Amount>,
    overdrawn: Option<Address>,
}

impl<'a> BalanceProjection<'a> {
    pub(crate) fn new(state: &'a dyn StateCache) -> Self {
        BalanceProjection {
            state,
            balances: HashMap::new(),
            overdrawn: None,
        }
    }

    pub(crate) fn balance_of(&self, address: &Address) -> Amount {
        match self.balances.get(address) {
            Some(balance) => *balance,
            None => self
                .state
                .find_state(address)
                .map(|state| state.balance)
                .unwrap_or_default(),
        }
    }

    /// First account a debit could not be covered for since the last call
    pub(crate) fn take_overdrawn(&mut self) -> Option<Address> {
        self.overdrawn.take()
    }
}

impl TransferObserver for BalanceProjection<'_> {
    fn notify_credit(&mut self, account: &Address, amount: Amount) {
        let balance = self.balance_of(account).saturating_add(amount);
        self.balances.insert(*account, balance);
    }

    fn notify_debit(&mut self, account: &Address, amount: Amount) {
        match self.balance_of(account).checked_sub(amount) {
            Some(balance) => {
                self.balances.insert(*account, balance);
            }
            None => {
                self.overdrawn.get_or_insert(*account);
            }
        }
    }
}
