// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::StateEffect;
use ledger_models::notification::{BlockNotificationContext, Notification, NotificationTrigger};
use ledger_state::{RemoteLink, RemoteLinkOwner, StateCache};

/// Remote harvesting links created by importance transfers, on both accounts
pub struct RemoteLinkEffect;

impl StateEffect for RemoteLinkEffect {
    fn apply(
        &self,
        notification: &Notification,
        context: &BlockNotificationContext,
        cache: &mut dyn StateCache,
    ) {
        let (lessor, lessee, mode) = match notification {
            Notification::ImportanceTransfer {
                lessor,
                lessee,
                mode,
            } => (*lessor, *lessee, *mode),
            Notification::BalanceTransfer { .. }
            | Notification::BalanceCredit { .. }
            | Notification::BalanceDebit { .. }
            | Notification::AccountSeen { .. }
            | Notification::CosignatoryModification { .. }
            | Notification::TransactionHashes { .. }
            | Notification::HarvestReward { .. } => return,
        };
        let lessor_link = RemoteLink {
            linked_address: lessee,
            height: context.height,
            mode,
            owner: RemoteLinkOwner::HarvestingRemotely,
        };
        let lessee_link = RemoteLink {
            linked_address: lessor,
            height: context.height,
            mode,
            owner: RemoteLinkOwner::RemoteHarvester,
        };
        match context.trigger {
            NotificationTrigger::Execute => {
                cache.find_state_mut(&lessor).remote_links.add_link(lessor_link);
                cache.find_state_mut(&lessee).remote_links.add_link(lessee_link);
            }
            NotificationTrigger::Undo => {
                cache.find_state_mut(&lessee).remote_links.remove_link(&lessee_link);
                cache.find_state_mut(&lessor).remote_links.remove_link(&lessor_link);
            }
        }
    }
}
