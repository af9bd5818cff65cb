// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Interfaces of the chain synchronizer: the capabilities it needs from its host
//! (peer selection, peer requests, scoring, the unconfirmed pool, validators),
//! its configuration, its errors and the outcomes it reports.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod comparison;
mod config;
mod controller_traits;
mod error;
mod outcome;

pub use comparison::{ComparisonResult, ComparisonResultCode};
pub use config::{ChainScoreMode, SyncConfig};
pub use controller_traits::{
    BlockValidator, ChainScorer, NodeSelector, SyncConnector, TransactionValidator,
    UnconfirmedTransactions,
};
#[cfg(any(test, feature = "test-exports"))]
pub use controller_traits::{
    MockChainScorer, MockNodeSelector, MockSyncConnector, MockUnconfirmedTransactions,
};
pub use error::{ConnectorError, SyncError};
pub use outcome::{DivergenceReason, NodeInteractionResult, NotNeededReason, SyncOutcome};

#[cfg(test)]
mod tests;
