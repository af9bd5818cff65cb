// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Value types of the ledger: accounts, amounts, transactions, blocks,
//! and the notifications through which they mutate state.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

pub use address::Address;
pub use amount::Amount;
pub use block::{Block, BlockContent};
pub use error::{ModelsError, ModelsResult};
pub use hash_chain::HashChain;
pub use height::BlockHeight;
pub use node::{Node, NodeId};
pub use score::ChainScore;
pub use transaction::{Transaction, TransactionContent, TransactionKind};

/// account address
pub mod address;
/// fixed-point coin amounts
pub mod amount;
/// blocks
pub mod block;
/// constants
pub mod constants;
/// models error
pub mod error;
/// hash chains used to locate the last common block
pub mod hash_chain;
/// block heights
pub mod height;
/// peers
pub mod node;
/// ledger effects
pub mod notification;
/// notification consumers
pub mod observer;
/// chain scores
pub mod score;
/// signed content
pub mod secure_share;
/// transactions
pub mod transaction;
/// validation outcomes
pub mod validation;

/// fixtures for tests
#[cfg(any(test, feature = "test-exports"))]
pub mod test_exports;

#[cfg(test)]
mod tests;
