// Copyright (c) 2022 MASSA LABS <info@massa.net>

use serde::{Deserialize, Serialize};

/// Aggregate weight of a chain, compared to pick between competing chains
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChainScore(u128);

impl ChainScore {
    /// Score of an empty chain
    pub const ZERO: ChainScore = ChainScore(0);

    /// Wraps a raw score
    pub const fn new(score: u128) -> Self {
        ChainScore(score)
    }

    /// Raw score
    pub const fn to_u128(&self) -> u128 {
        self.0
    }

    /// Adds a score, saturating on overflow
    #[must_use]
    pub fn saturating_add(self, other: ChainScore) -> Self {
        ChainScore(self.0.saturating_add(other.0))
    }

    /// Subtracts a score, saturating at zero
    #[must_use]
    pub fn saturating_sub(self, other: ChainScore) -> Self {
        ChainScore(self.0.saturating_sub(other.0))
    }
}

impl std::fmt::Display for ChainScore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::iter::Sum for ChainScore {
    fn sum<I: Iterator<Item = ChainScore>>(iter: I) -> Self {
        iter.fold(ChainScore::ZERO, ChainScore::saturating_add)
    }
}
