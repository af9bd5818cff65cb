// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Effect appliers: each one translates the notifications it cares about into
//! mutations of the state cache and ignores the others.

mod account_seen;
mod balance;
mod cosignatory;
mod harvest;
mod remote;
mod transaction_hashes;

pub use account_seen::AccountSeenEffect;
pub use balance::{BalanceCommitObserver, BalanceEffect};
pub use cosignatory::CosignatoryEffect;
pub use harvest::HarvestRewardEffect;
pub use remote::RemoteLinkEffect;
pub use transaction_hashes::TransactionHashesEffect;

use ledger_models::notification::{BlockNotificationContext, Notification};
use ledger_state::StateCache;

/// Applies one kind of ledger effect to the state cache
pub trait StateEffect: Send + Sync {
    /// Applies `notification`, delivered during the block pass described by `context`
    fn apply(
        &self,
        notification: &Notification,
        context: &BlockNotificationContext,
        cache: &mut dyn StateCache,
    );
}

/// Every effect of the ledger
pub fn default_effects() -> Vec<Box<dyn StateEffect>> {
    vec![
        Box::new(AccountSeenEffect),
        Box::new(BalanceEffect),
        Box::new(HarvestRewardEffect),
        Box::new(RemoteLinkEffect),
        Box::new(CosignatoryEffect),
        Box::new(TransactionHashesEffect),
    ]
}
