// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::address::Address;
use crate::amount::Amount;
use crate::error::ModelsResult;
use crate::height::BlockHeight;
use crate::secure_share::{SecureShare, SecureShareContent};
use crate::transaction::Transaction;
use ledger_hash::Hash;
use ledger_time::LedgerTime;
use serde::{Deserialize, Serialize};

/// Unsigned block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContent {
    /// hash of the parent block, `Hash::zero()` for genesis
    pub previous_block_hash: Hash,
    /// creation time
    pub timestamp: LedgerTime,
    /// parent height + 1
    pub height: BlockHeight,
    /// score input used by difficulty-based scoring
    pub difficulty: u64,
    /// transactions, in execution order
    pub transactions: Vec<Transaction>,
}

impl SecureShareContent for BlockContent {}

/// Signed block
pub type Block = SecureShare<BlockContent>;

impl Block {
    /// Account that created and signed the block
    pub fn signer(&self) -> Address {
        self.content_creator_address
    }

    /// Block hash
    pub fn hash(&self) -> Hash {
        self.id
    }

    /// Height of the block
    pub fn height(&self) -> BlockHeight {
        self.content.height
    }

    /// Timestamp of the block
    pub fn timestamp(&self) -> LedgerTime {
        self.content.timestamp
    }

    /// Sum of the fees of all transactions
    pub fn total_fee(&self) -> Amount {
        self.content
            .transactions
            .iter()
            .fold(Amount::zero(), |total, tx| total.saturating_add(tx.fee()))
    }

    /// Checks the block signature and the signature of every transaction
    pub fn verify(&self) -> ModelsResult<()> {
        self.verify_signature()?;
        for transaction in &self.content.transactions {
            transaction.verify_signature()?;
        }
        Ok(())
    }
}
