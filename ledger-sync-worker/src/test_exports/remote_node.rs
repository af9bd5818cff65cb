// Copyright (c) 2022 MASSA LABS <info@massa.net>

use async_trait::async_trait;
use ledger_models::{Block, BlockHeight, ChainScore, HashChain, Node, Transaction};
use ledger_sync_exports::{ChainScorer, ConnectorError, SyncConnector};
use std::time::Duration;

/// Peer answering synchronization requests from a chain held in memory
pub struct InMemoryNode {
    /// peer chain, genesis first
    pub blocks: Vec<Block>,
    /// score the peer reports
    pub score: ChainScore,
    /// transactions the peer has not confirmed
    pub unconfirmed: Vec<Transaction>,
    /// maximum number of hashes per answer
    pub max_hashes: usize,
    /// maximum number of blocks per answer
    pub max_blocks: usize,
    /// delay before every answer
    pub response_delay: Option<Duration>,
}

impl InMemoryNode {
    /// Peer holding `blocks`, reporting the score `scorer` gives them
    pub fn new(blocks: Vec<Block>, scorer: &dyn ChainScorer, genesis_score: ChainScore) -> Self {
        let score = blocks
            .windows(2)
            .map(|pair| scorer.calculate_block_score(&pair[0], &pair[1]))
            .fold(genesis_score, ChainScore::saturating_add);
        InMemoryNode {
            blocks,
            score,
            unconfirmed: Vec::new(),
            max_hashes: usize::MAX,
            max_blocks: usize::MAX,
            response_delay: None,
        }
    }

    /// Block of the peer chain at `height`
    pub fn block_at(&self, height: BlockHeight) -> Option<&Block> {
        self.blocks.iter().find(|block| block.height() == height)
    }

    async fn wait(&self) {
        if let Some(delay) = self.response_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SyncConnector for InMemoryNode {
    async fn get_chain_score(&self, _node: &Node) -> Result<ChainScore, ConnectorError> {
        self.wait().await;
        Ok(self.score)
    }

    async fn get_last_block(&self, _node: &Node) -> Result<Option<Block>, ConnectorError> {
        self.wait().await;
        Ok(self.blocks.last().cloned())
    }

    async fn get_hashes_from(
        &self,
        _node: &Node,
        height: BlockHeight,
    ) -> Result<HashChain, ConnectorError> {
        self.wait().await;
        Ok(HashChain::new(
            self.blocks
                .iter()
                .filter(|block| block.height() >= height)
                .take(self.max_hashes)
                .map(|block| block.hash())
                .collect(),
        ))
    }

    async fn get_chain_after(
        &self,
        _node: &Node,
        height: BlockHeight,
    ) -> Result<Vec<Block>, ConnectorError> {
        self.wait().await;
        Ok(self
            .blocks
            .iter()
            .filter(|block| block.height() > height)
            .take(self.max_blocks)
            .cloned()
            .collect())
    }

    async fn get_unconfirmed_transactions(
        &self,
        _node: &Node,
    ) -> Result<Vec<Transaction>, ConnectorError> {
        self.wait().await;
        Ok(self.unconfirmed.clone())
    }
}
