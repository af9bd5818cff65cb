// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{
    ChainSynchronizer, DefaultBlockValidator, DefaultChainScorer, DefaultTransactionValidator,
    DefaultUnconfirmedTransactions, SyncCapabilities,
};
use ledger_execution::BlockExecutor;
use ledger_hash::Hash;
use ledger_models::test_exports::{create_block, create_child_block};
use ledger_models::{Block, BlockHeight, ChainScore, Node, NodeId, Transaction};
use ledger_signature::KeyPair;
use ledger_state::{AccountState, ChainLookup, LedgerState, LedgerStateConfig};
use ledger_sync_exports::{ChainScorer, NodeSelector, SyncConfig, SyncConnector};
use ledger_time::{LedgerTime, ManualClock};
use std::sync::Arc;

/// Timestamp of the test genesis block
pub const TEST_GENESIS_TIME: LedgerTime = LedgerTime::from_secs(1_000);
/// Time between two consecutive test blocks
pub const TEST_BLOCK_DELTA: LedgerTime = LedgerTime::from_secs(10);
/// Score of the test genesis block
pub const TEST_GENESIS_SCORE: ChainScore = ChainScore::new(1);
/// Difficulty of test blocks unless stated otherwise
pub const TEST_DIFFICULTY: u64 = 10;

/// Installs a tracing subscriber printing to the test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Peer with a random identity
pub fn test_node() -> Node {
    Node {
        id: NodeId::new(KeyPair::generate().get_public_key()),
        endpoint: std::net::SocketAddr::from(([127, 0, 0, 1], 31244)),
    }
}

/// `count` empty blocks harvested by `harvester` on top of `parent`
pub fn extend_chain(harvester: &KeyPair, parent: &Block, count: usize, difficulty: u64) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::with_capacity(count);
    for _ in 0..count {
        let block = create_child_block(
            harvester,
            blocks.last().unwrap_or(parent),
            TEST_BLOCK_DELTA,
            difficulty,
            vec![],
        );
        blocks.push(block);
    }
    blocks
}

/// Child of `parent` carrying `transactions`
pub fn child_with(harvester: &KeyPair, parent: &Block, difficulty: u64, transactions: Vec<Transaction>) -> Block {
    create_child_block(harvester, parent, TEST_BLOCK_DELTA, difficulty, transactions)
}

/// Local ledger with the shared fixtures a synchronizer needs
pub struct TestLedger {
    /// synchronizer configuration
    pub config: SyncConfig,
    /// committed state
    pub state: Arc<LedgerState>,
    /// clock of the validators and the pool
    pub clock: ManualClock,
    /// unconfirmed pool
    pub unconfirmed: Arc<DefaultUnconfirmedTransactions>,
    /// genesis block
    pub genesis: Block,
}

impl TestLedger {
    /// Ledger holding only a genesis block and `accounts`
    pub fn new(config: SyncConfig, accounts: Vec<AccountState>) -> Self {
        let genesis = create_block(
            &KeyPair::generate(),
            Hash::zero(),
            BlockHeight::GENESIS,
            TEST_GENESIS_TIME,
            1,
            vec![],
        );
        let state = Arc::new(
            LedgerState::new(
                LedgerStateConfig::default(),
                genesis.clone(),
                TEST_GENESIS_SCORE,
                accounts,
            )
            .unwrap(),
        );
        let clock = ManualClock::new(TEST_GENESIS_TIME);
        let unconfirmed = Arc::new(DefaultUnconfirmedTransactions::new(
            state.clone(),
            Arc::new(clock.clone()),
        ));
        TestLedger {
            config,
            state,
            clock,
            unconfirmed,
            genesis,
        }
    }

    /// Scorer of the configured score mode
    pub fn scorer(&self) -> DefaultChainScorer {
        DefaultChainScorer::new(self.config.score_mode)
    }

    /// Executes and commits `blocks` on top of the local chain, without validation
    pub fn append(&self, blocks: &[Block]) {
        let executor = BlockExecutor::default();
        let scorer = self.scorer();
        let mut view = self.state.create_view();
        for block in blocks {
            let parent = Arc::clone(&view.last_block().block);
            executor.execute(block, &mut view);
            view.push_block(block.clone(), scorer.calculate_block_score(&parent, block));
        }
        self.state.commit(view).unwrap();
        if let Some(last) = blocks.last() {
            self.clock.set(last.timestamp());
        }
    }

    /// Local chain, genesis first
    pub fn local_chain(&self) -> Vec<Block> {
        let snapshot = self.state.snapshot();
        let chain = snapshot.chain();
        let mut blocks = Vec::new();
        let mut height = BlockHeight::GENESIS;
        while let Some(stored) = chain.block_at(height) {
            blocks.push(stored.block.as_ref().clone());
            height = height.next();
        }
        blocks
    }

    /// Synchronizer over this ledger with the default validators and scorer
    pub fn synchronizer(
        &self,
        selector: Box<dyn NodeSelector>,
        connector: Arc<dyn SyncConnector>,
    ) -> ChainSynchronizer {
        let capabilities = SyncCapabilities {
            selector,
            connector,
            scorer: Box::new(self.scorer()),
            unconfirmed: self.unconfirmed.clone(),
            block_validator: Box::new(DefaultBlockValidator::new(
                &self.config,
                Arc::new(self.clock.clone()),
            )),
            transaction_validator: Box::new(DefaultTransactionValidator),
        };
        ChainSynchronizer::new(self.config.clone(), self.state.clone(), capabilities)
    }
}
