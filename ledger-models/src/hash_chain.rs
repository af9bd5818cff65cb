// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_hash::Hash;
use serde::{Deserialize, Serialize};

/// Consecutive block hashes starting at some height, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashChain(Vec<Hash>);

impl HashChain {
    /// Wraps a list of hashes
    pub fn new(hashes: Vec<Hash>) -> Self {
        HashChain(hashes)
    }

    /// Number of hashes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain holds no hash
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hashes, oldest first
    pub fn hashes(&self) -> &[Hash] {
        &self.0
    }

    /// Index of the most recent hash of the prefix both chains share.
    ///
    /// Both chains must start at the same height. Returns `None` when even the
    /// first hashes differ.
    ///
    /// ```
    /// # use ledger_models::hash_chain::HashChain;
    /// # use ledger_hash::Hash;
    /// let h = |i: u8| Hash::compute_from(&[i]);
    /// let local = HashChain::new(vec![h(1), h(2), h(3), h(4)]);
    /// let remote = HashChain::new(vec![h(1), h(2), h(7), h(8), h(9)]);
    /// assert_eq!(local.find_last_common(&remote), Some(1));
    /// ```
    pub fn find_last_common(&self, other: &HashChain) -> Option<usize> {
        self.0
            .iter()
            .zip(other.0.iter())
            .take_while(|(left, right)| left == right)
            .count()
            .checked_sub(1)
    }
}

impl From<Vec<Hash>> for HashChain {
    fn from(hashes: Vec<Hash>) -> Self {
        HashChain(hashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[u8]) -> HashChain {
        HashChain::new(ids.iter().map(|i| Hash::compute_from(&[*i])).collect())
    }

    #[test]
    fn test_find_last_common() {
        assert_eq!(chain(&[1, 2, 3]).find_last_common(&chain(&[1, 2, 3])), Some(2));
        assert_eq!(chain(&[1, 2, 3]).find_last_common(&chain(&[1, 2])), Some(1));
        assert_eq!(chain(&[1, 2, 3]).find_last_common(&chain(&[4, 2, 3])), None);
        assert_eq!(chain(&[]).find_last_common(&chain(&[1])), None);
    }
}
