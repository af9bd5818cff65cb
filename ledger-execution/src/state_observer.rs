// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::effects::StateEffect;
use ledger_models::notification::{BlockNotificationContext, Notification};
use ledger_models::observer::BlockTransactionObserver;
use ledger_state::StateCache;

/// Block observer delivering every notification to a list of effects,
/// all writing to the same state cache
pub struct StateObserver<'a> {
    cache: &'a mut dyn StateCache,
    effects: &'a [Box<dyn StateEffect>],
}

impl<'a> StateObserver<'a> {
    /// Observer applying `effects` to `cache`
    pub fn new(cache: &'a mut dyn StateCache, effects: &'a [Box<dyn StateEffect>]) -> Self {
        StateObserver { cache, effects }
    }
}

impl BlockTransactionObserver for StateObserver<'_> {
    fn notify(&mut self, notification: &Notification, context: &BlockNotificationContext) {
        for effect in self.effects {
            effect.apply(notification, context, self.cache);
        }
    }
}
