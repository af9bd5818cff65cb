// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::error::ConnectorError;
use async_trait::async_trait;
use ledger_hash::Hash;
use ledger_models::validation::ValidationResult;
use ledger_models::{Block, BlockHeight, ChainScore, HashChain, Node, Transaction};
use ledger_state::StateCache;

/// Picks the peer to synchronize with
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait NodeSelector: Send + Sync {
    /// a peer, `None` if no peer is available
    fn select_node(&self) -> Option<Node>;
}

/// Requests sent to a peer. The synchronizer bounds every call with its request timeout.
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
#[async_trait]
pub trait SyncConnector: Send + Sync {
    /// score of the peer chain
    async fn get_chain_score(&self, node: &Node) -> Result<ChainScore, ConnectorError>;

    /// last block of the peer chain, `None` if the peer has none
    async fn get_last_block(&self, node: &Node) -> Result<Option<Block>, ConnectorError>;

    /// hashes of the peer chain starting at `height`, oldest first
    async fn get_hashes_from(
        &self,
        node: &Node,
        height: BlockHeight,
    ) -> Result<HashChain, ConnectorError>;

    /// blocks of the peer chain following `height`, oldest first
    async fn get_chain_after(
        &self,
        node: &Node,
        height: BlockHeight,
    ) -> Result<Vec<Block>, ConnectorError>;

    /// transactions the peer has not confirmed yet
    async fn get_unconfirmed_transactions(
        &self,
        node: &Node,
    ) -> Result<Vec<Transaction>, ConnectorError>;
}

/// Scores blocks
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait ChainScorer: Send + Sync {
    /// score `block` adds to the chain ending with `parent`
    fn calculate_block_score(&self, parent: &Block, block: &Block) -> ChainScore;
}

/// Transactions waiting to be included in a block
#[cfg_attr(any(test, feature = "test-exports"), mockall::automock)]
pub trait UnconfirmedTransactions: Send + Sync {
    /// adds a transaction received from the network
    fn add_new(&self, transaction: Transaction) -> ValidationResult;

    /// adds transactions received from the network, returns the first failure if any
    fn add_new_batch(&self, transactions: Vec<Transaction>) -> ValidationResult;

    /// adds back a transaction that was confirmed by a block rolled back since
    fn add_existing(&self, transaction: Transaction) -> ValidationResult;

    /// removes every transaction `block` confirms
    fn remove_all(&self, block: &Block);

    /// all transactions, oldest first
    fn get_all(&self) -> Vec<Transaction>;

    /// whether the pool holds the transaction `hash`
    fn contains(&self, hash: &Hash) -> bool;

    /// number of transactions
    fn len(&self) -> usize;

    /// whether the pool is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks a block against its parent, independently of the account states
pub trait BlockValidator: Send + Sync {
    /// validates `block` as a child of `parent`
    fn validate(&self, parent: &Block, block: &Block) -> ValidationResult;
}

/// Checks the transactions of a block against the account states
pub trait TransactionValidator: Send + Sync {
    /// validates the transactions of `block` in order, against `state` as it is
    /// right before `block` is executed
    fn validate(&self, block: &Block, state: &dyn StateCache) -> ValidationResult;
}
