// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::StateEffect;
use ledger_models::notification::{BlockNotificationContext, Notification, NotificationTrigger};
use ledger_state::StateCache;

/// Confirmed transaction hashes
pub struct TransactionHashesEffect;

impl StateEffect for TransactionHashesEffect {
    fn apply(
        &self,
        notification: &Notification,
        context: &BlockNotificationContext,
        cache: &mut dyn StateCache,
    ) {
        let pairs = match notification {
            Notification::TransactionHashes { pairs } => pairs,
            Notification::BalanceTransfer { .. }
            | Notification::BalanceCredit { .. }
            | Notification::BalanceDebit { .. }
            | Notification::AccountSeen { .. }
            | Notification::CosignatoryModification { .. }
            | Notification::ImportanceTransfer { .. }
            | Notification::HarvestReward { .. } => return,
        };
        match context.trigger {
            NotificationTrigger::Execute => {
                for pair in pairs {
                    cache.put_hash(*pair);
                }
            }
            NotificationTrigger::Undo => {
                for pair in pairs.iter().rev() {
                    cache.remove_hash(&pair.hash);
                }
            }
        }
    }
}
