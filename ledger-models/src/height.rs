// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::constants::GENESIS_HEIGHT;
use serde::{Deserialize, Serialize};

/// Position of a block in a chain, starting at `GENESIS_HEIGHT`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Height of the genesis block
    pub const GENESIS: BlockHeight = BlockHeight(GENESIS_HEIGHT);

    /// Wraps a raw height
    pub const fn new(height: u64) -> Self {
        BlockHeight(height)
    }

    /// Raw height
    pub const fn to_u64(&self) -> u64 {
        self.0
    }

    /// Height of the child block
    #[must_use]
    pub fn next(&self) -> Self {
        BlockHeight(self.0.saturating_add(1))
    }

    /// Height of the parent block, `None` below genesis
    pub fn prev(&self) -> Option<Self> {
        if self.0 > GENESIS_HEIGHT {
            Some(BlockHeight(self.0 - 1))
        } else {
            None
        }
    }

    /// Number of blocks from `other` up to `self`, `None` if `other` is above `self`
    pub fn checked_sub(&self, other: BlockHeight) -> Option<u64> {
        self.0.checked_sub(other.0)
    }

    /// Moves `blocks` down the chain, never going below genesis
    #[must_use]
    pub fn saturating_sub_blocks(&self, blocks: u64) -> Self {
        BlockHeight(self.0.saturating_sub(blocks).max(GENESIS_HEIGHT))
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        BlockHeight(height)
    }
}
