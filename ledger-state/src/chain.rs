// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Local chain of applied blocks.

use ledger_hash::Hash;
use ledger_models::{Block, BlockHeight, ChainScore, HashChain};
use std::collections::HashMap;
use std::sync::Arc;

/// A block of the local chain with its score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlock {
    /// the block
    pub block: Arc<Block>,
    /// score of the block relative to its parent
    pub score: ChainScore,
    /// score of the chain up to and including the block
    pub cumulative_score: ChainScore,
}

/// Read access to a chain of blocks indexed by height
pub trait ChainLookup {
    /// Block at `height`
    fn block_at(&self, height: BlockHeight) -> Option<&StoredBlock>;

    /// Height of the block with hash `hash`
    fn height_of(&self, hash: &Hash) -> Option<BlockHeight>;

    /// Tip of the chain
    fn last_block(&self) -> &StoredBlock;

    /// Height of the tip
    fn height(&self) -> BlockHeight {
        self.last_block().block.height()
    }

    /// Cumulative score of the chain
    fn score(&self) -> ChainScore {
        self.last_block().cumulative_score
    }

    /// Hashes of at most `max` consecutive blocks starting at `from`
    fn hashes_from(&self, from: BlockHeight, max: usize) -> HashChain {
        let mut hashes = Vec::new();
        let mut height = from;
        while hashes.len() < max {
            match self.block_at(height) {
                Some(stored) => hashes.push(stored.block.hash()),
                None => break,
            }
            height = height.next();
        }
        HashChain::new(hashes)
    }

    /// At most `max` consecutive blocks following `height`
    fn blocks_after(&self, height: BlockHeight, max: usize) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut height = height.next();
        while blocks.len() < max {
            match self.block_at(height) {
                Some(stored) => blocks.push(stored.block.as_ref().clone()),
                None => break,
            }
            height = height.next();
        }
        blocks
    }
}

/// Committed chain, from genesis to tip
#[derive(Debug, Clone)]
pub struct BlockChain {
    blocks: Vec<StoredBlock>,
    index: HashMap<Hash, BlockHeight>,
}

impl BlockChain {
    /// Chain made of `genesis` alone
    pub(crate) fn new(genesis: Block, score: ChainScore) -> Self {
        let mut index = HashMap::new();
        index.insert(genesis.hash(), genesis.height());
        BlockChain {
            blocks: vec![StoredBlock {
                block: Arc::new(genesis),
                score,
                cumulative_score: score,
            }],
            index,
        }
    }

    fn offset(&self, height: BlockHeight) -> Option<usize> {
        let first = self.blocks.first()?.block.height();
        usize::try_from(height.checked_sub(first)?).ok()
    }

    /// Drops every block above `height`. The genesis block is never dropped.
    pub(crate) fn truncate(&mut self, height: BlockHeight) {
        let keep = self.offset(height).map_or(1, |offset| offset + 1).max(1);
        for removed in self.blocks.drain(keep.min(self.blocks.len())..) {
            self.index.remove(&removed.block.hash());
        }
    }

    /// Appends a block already scored against the tip.
    ///
    /// # Panics
    /// When the block does not extend the tip.
    pub(crate) fn push(&mut self, stored: StoredBlock) {
        let tip = self.last_block();
        assert!(
            stored.block.height() == tip.block.height().next()
                && stored.block.content.previous_block_hash == tip.block.hash(),
            "block {} at height {} does not extend tip {}",
            stored.block.hash(),
            stored.block.height(),
            tip.block.hash()
        );
        self.index.insert(stored.block.hash(), stored.block.height());
        self.blocks.push(stored);
    }
}

impl ChainLookup for BlockChain {
    fn block_at(&self, height: BlockHeight) -> Option<&StoredBlock> {
        self.blocks.get(self.offset(height)?)
    }

    fn height_of(&self, hash: &Hash) -> Option<BlockHeight> {
        self.index.get(hash).copied()
    }

    fn last_block(&self) -> &StoredBlock {
        // never empty: built with a genesis block that truncate keeps
        &self.blocks[self.blocks.len() - 1]
    }
}
