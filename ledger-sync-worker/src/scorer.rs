// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_models::{Block, ChainScore};
use ledger_sync_exports::{ChainScoreMode, ChainScorer};

/// Scores blocks with one of the `ChainScoreMode` formulas
#[derive(Debug, Clone, Copy)]
pub struct DefaultChainScorer {
    mode: ChainScoreMode,
}

impl DefaultChainScorer {
    /// Scorer using `mode`
    pub fn new(mode: ChainScoreMode) -> Self {
        DefaultChainScorer { mode }
    }
}

impl ChainScorer for DefaultChainScorer {
    fn calculate_block_score(&self, parent: &Block, block: &Block) -> ChainScore {
        let difficulty = u128::from(block.content.difficulty);
        match self.mode {
            ChainScoreMode::Height => ChainScore::new(1),
            ChainScoreMode::Difficulty => ChainScore::new(difficulty),
            ChainScoreMode::TimeAdjustedDifficulty => {
                let elapsed = block.timestamp().saturating_sub(parent.timestamp()).to_secs();
                ChainScore::new(difficulty.saturating_sub(u128::from(elapsed)))
            }
        }
    }
}
