// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::StateEffect;
use ledger_models::notification::{BlockNotificationContext, Notification, NotificationTrigger};
use ledger_state::StateCache;

/// Harvesting statistics of the account receiving block fees
pub struct HarvestRewardEffect;

impl StateEffect for HarvestRewardEffect {
    fn apply(
        &self,
        notification: &Notification,
        context: &BlockNotificationContext,
        cache: &mut dyn StateCache,
    ) {
        let (account, amount) = match notification {
            Notification::HarvestReward { account, amount } => (account, *amount),
            Notification::BalanceTransfer { .. }
            | Notification::BalanceCredit { .. }
            | Notification::BalanceDebit { .. }
            | Notification::AccountSeen { .. }
            | Notification::CosignatoryModification { .. }
            | Notification::ImportanceTransfer { .. }
            | Notification::TransactionHashes { .. } => return,
        };
        let info = &mut cache.find_state_mut(account).info;
        match context.trigger {
            NotificationTrigger::Execute => {
                info.harvested_blocks += 1;
                info.harvested_fees = info.harvested_fees.saturating_add(amount);
            }
            NotificationTrigger::Undo => {
                info.harvested_blocks = info
                    .harvested_blocks
                    .checked_sub(1)
                    .unwrap_or_else(|| panic!("{} has no harvested block to undo", account));
                info.harvested_fees = info.harvested_fees.checked_sub(amount).unwrap_or_else(|| {
                    panic!("{} harvested less than the {} being undone", account, amount)
                });
            }
        }
    }
}
