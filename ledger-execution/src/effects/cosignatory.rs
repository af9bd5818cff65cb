// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::StateEffect;
use ledger_models::notification::{BlockNotificationContext, Notification, NotificationTrigger};
use ledger_models::transaction::CosignatoryModificationKind;
use ledger_state::StateCache;

/// Cosignatory relations, kept on the multisig account and on the cosignatory
pub struct CosignatoryEffect;

impl StateEffect for CosignatoryEffect {
    fn apply(
        &self,
        notification: &Notification,
        context: &BlockNotificationContext,
        cache: &mut dyn StateCache,
    ) {
        let (multisig, modification) = match notification {
            Notification::CosignatoryModification {
                multisig,
                modification,
            } => (*multisig, *modification),
            Notification::BalanceTransfer { .. }
            | Notification::BalanceCredit { .. }
            | Notification::BalanceDebit { .. }
            | Notification::AccountSeen { .. }
            | Notification::ImportanceTransfer { .. }
            | Notification::TransactionHashes { .. }
            | Notification::HarvestReward { .. } => return,
        };
        let cosignatory = modification.cosignatory;
        let add = match (modification.kind, context.trigger) {
            (CosignatoryModificationKind::Add, NotificationTrigger::Execute)
            | (CosignatoryModificationKind::Del, NotificationTrigger::Undo) => true,
            (CosignatoryModificationKind::Del, NotificationTrigger::Execute)
            | (CosignatoryModificationKind::Add, NotificationTrigger::Undo) => false,
        };
        if add {
            cache
                .find_state_mut(&multisig)
                .multisig_links
                .add_cosignatory(cosignatory);
            cache
                .find_state_mut(&cosignatory)
                .multisig_links
                .add_cosignatory_of(multisig);
        } else {
            cache
                .find_state_mut(&multisig)
                .multisig_links
                .remove_cosignatory(&cosignatory);
            cache
                .find_state_mut(&cosignatory)
                .multisig_links
                .remove_cosignatory_of(&multisig);
        }
    }
}
