// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! # General description
//!
//! The chain synchronizer keeps the local chain on the best chain known to the network.
//!
//! A round picks a peer, compares its chain with ours (`BlockChainComparer`), locates
//! the most recent common block, then rolls our blocks back down to it and applies the
//! peer blocks on a private `StateView`. The view is committed only when every peer
//! block validated and the peer chain scored strictly better than the rolled back
//! blocks: any failure drops the view, which leaves the local state exactly as it was.
//!
//! Blocks pushed by peers or harvested locally go through `ChainSynchronizer::process_block`,
//! which treats them as a one-block peer chain rooted at their parent.
//!
//! Transactions only confirmed by rolled back blocks go back to the unconfirmed pool
//! once the new chain is committed, and transactions confirmed by the new blocks leave it.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod comparer;
mod request;
mod scorer;
mod synchronizer;
mod unconfirmed;
mod validators;

pub use comparer::BlockChainComparer;
pub use scorer::DefaultChainScorer;
pub use synchronizer::{ChainSynchronizer, SyncCapabilities};
pub use unconfirmed::DefaultUnconfirmedTransactions;
pub use validators::{DefaultBlockValidator, DefaultTransactionValidator};

/// fixtures for tests
#[cfg(any(test, feature = "test-exports"))]
pub mod test_exports;

#[cfg(test)]
mod tests;
