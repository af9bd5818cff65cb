// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Account state of the ledger, the local chain, and the versioned store
//! that publishes copy-on-write views atomically.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod account_state;
mod cache;
mod chain;
mod config;
mod error;
mod store;
mod view;

pub use account_state::{
    AccountImportance, AccountInfo, AccountState, MultisigLinks, RemoteLink, RemoteLinkOwner,
    RemoteLinks,
};
pub use cache::{AccountStateCache, ReadOnlyAccountStateCache, StateCache, TransactionHashCache};
pub use chain::{BlockChain, ChainLookup, StoredBlock};
pub use config::LedgerStateConfig;
pub use error::LedgerStateError;
pub use store::{LedgerSnapshot, LedgerState};
pub use view::StateView;

#[cfg(test)]
mod tests;
