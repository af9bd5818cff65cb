// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::StateEffect;
use ledger_models::notification::{BlockNotificationContext, Notification, NotificationTrigger};
use ledger_state::StateCache;

/// Reference counting of accounts referenced by transactions
pub struct AccountSeenEffect;

impl StateEffect for AccountSeenEffect {
    fn apply(
        &self,
        notification: &Notification,
        context: &BlockNotificationContext,
        cache: &mut dyn StateCache,
    ) {
        let account = match notification {
            Notification::AccountSeen { account } => account,
            Notification::BalanceTransfer { .. }
            | Notification::BalanceCredit { .. }
            | Notification::BalanceDebit { .. }
            | Notification::CosignatoryModification { .. }
            | Notification::ImportanceTransfer { .. }
            | Notification::TransactionHashes { .. }
            | Notification::HarvestReward { .. } => return,
        };
        let info = &mut cache.find_state_mut(account).info;
        match context.trigger {
            NotificationTrigger::Execute => {
                if info.reference_count == 0 {
                    info.height_seen = Some(context.height);
                }
                info.reference_count += 1;
            }
            NotificationTrigger::Undo => {
                info.reference_count = info.reference_count.checked_sub(1).unwrap_or_else(|| {
                    panic!("undoing a reference to {} that was never counted", account)
                });
                if info.reference_count == 0 {
                    info.height_seen = None;
                }
            }
        }
    }
}
