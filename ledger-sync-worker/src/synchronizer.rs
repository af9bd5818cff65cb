// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::comparer::BlockChainComparer;
use crate::request::request;
use ledger_execution::BlockExecutor;
use ledger_hash::Hash;
use ledger_logging::ledger_trace;
use ledger_models::validation::{FailureReason, ValidationResult};
use ledger_models::{Block, BlockHeight, ChainScore, Node};
use ledger_state::{ChainLookup, LedgerSnapshot, LedgerState, LedgerStateError, StoredBlock};
use ledger_sync_exports::{
    BlockValidator, ChainScorer, ComparisonResultCode, DivergenceReason, NodeSelector,
    NotNeededReason, SyncConfig, SyncConnector, SyncError, SyncOutcome, TransactionValidator,
    UnconfirmedTransactions,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the synchronizer needs from its host
pub struct SyncCapabilities {
    /// picks the peer of a round
    pub selector: Box<dyn NodeSelector>,
    /// sends requests to peers
    pub connector: Arc<dyn SyncConnector>,
    /// scores peer blocks
    pub scorer: Box<dyn ChainScorer>,
    /// pool reconciled after each adoption
    pub unconfirmed: Arc<dyn UnconfirmedTransactions>,
    /// structural block checks
    pub block_validator: Box<dyn BlockValidator>,
    /// contextual transaction checks
    pub transaction_validator: Box<dyn TransactionValidator>,
}

/// Where a peer chain attaches to the local chain
struct PeerChain {
    common_block_height: BlockHeight,
    blocks: Vec<Block>,
}

/// Keeps the local chain on the best chain known to the network
pub struct ChainSynchronizer {
    config: SyncConfig,
    state: Arc<LedgerState>,
    executor: BlockExecutor,
    capabilities: SyncCapabilities,
}

impl ChainSynchronizer {
    /// Synchronizer updating `state`
    pub fn new(config: SyncConfig, state: Arc<LedgerState>, capabilities: SyncCapabilities) -> Self {
        ChainSynchronizer {
            config,
            state,
            executor: BlockExecutor::default(),
            capabilities,
        }
    }

    /// Runs one synchronization round with a peer picked by the node selector
    pub async fn synchronize(&self) -> Result<SyncOutcome, SyncError> {
        let node = match self.capabilities.selector.select_node() {
            Some(node) => node,
            None => {
                debug!("no peer available for synchronization");
                return Ok(SyncOutcome::NotNeeded(NotNeededReason::NoPeer));
            }
        };
        debug!("synchronizing with {}", node);
        self.synchronize_node(&node).await
    }

    /// Runs one synchronization round with `node`.
    ///
    /// The local state is only touched when the whole peer chain is adopted;
    /// errors and rejections leave it as it was.
    pub async fn synchronize_node(&self, node: &Node) -> Result<SyncOutcome, SyncError> {
        let snapshot = self.state.snapshot();
        let comparer = BlockChainComparer::new(&self.config, self.capabilities.connector.as_ref());
        let comparison = comparer.compare(snapshot.chain(), node).await?;
        if comparison.code.is_evil() {
            warn!("peer {} misbehaved during chain comparison: {:?}", node, comparison.code);
        }

        if comparison.code == ComparisonResultCode::RemoteIsSynced {
            let transactions = request(
                self.config.request_timeout,
                "get_unconfirmed_transactions",
                self.capabilities.connector.get_unconfirmed_transactions(node),
            )
            .await?;
            debug!("received {} unconfirmed transactions from {}", transactions.len(), node);
            self.capabilities.unconfirmed.add_new_batch(transactions);
        }
        if let Some(outcome) = SyncOutcome::from_comparison(comparison.code) {
            return Ok(outcome);
        }

        let common_block_height = match comparison.common_block_height {
            Some(height) => height,
            None => {
                return Ok(SyncOutcome::RejectedTooDivergent(
                    DivergenceReason::NoCommonAncestor,
                ))
            }
        };
        let depth = self.rollback_depth(&snapshot, common_block_height);
        if depth > self.config.max_blocks_to_rewrite {
            info!("refusing to roll back {} blocks for {}", depth, node);
            return Ok(SyncOutcome::RejectedTooDivergent(
                DivergenceReason::RewriteLimitExceeded,
            ));
        }

        let blocks = request(
            self.config.request_timeout,
            "get_chain_after",
            self.capabilities
                .connector
                .get_chain_after(node, common_block_height),
        )
        .await?;
        debug!(
            "received {} blocks after height {} from {}",
            blocks.len(),
            common_block_height,
            node
        );
        self.update_chain(
            &snapshot,
            PeerChain {
                common_block_height,
                blocks,
            },
        )
    }

    /// Applies a block pushed by a peer or harvested locally.
    ///
    /// The block replaces any local block above its parent when it scores better than them.
    pub fn process_block(&self, block: Block) -> Result<SyncOutcome, SyncError> {
        let snapshot = self.state.snapshot();
        let chain = snapshot.chain();
        if chain.height_of(&block.hash()).is_some() {
            return Ok(SyncOutcome::NotNeeded(NotNeededReason::AlreadyKnown));
        }
        let parent_height = match chain.height_of(&block.content.previous_block_hash) {
            Some(height) => height,
            None => return Ok(SyncOutcome::NotNeeded(NotNeededReason::UnknownParent)),
        };
        if self.rollback_depth(&snapshot, parent_height) > self.config.max_blocks_to_rewrite {
            return Ok(SyncOutcome::RejectedTooDivergent(
                DivergenceReason::RewriteLimitExceeded,
            ));
        }
        self.update_chain(
            &snapshot,
            PeerChain {
                common_block_height: parent_height,
                blocks: vec![block],
            },
        )
    }

    fn rollback_depth(&self, snapshot: &LedgerSnapshot, common_block_height: BlockHeight) -> u64 {
        snapshot
            .chain()
            .height()
            .checked_sub(common_block_height)
            .unwrap_or(0)
    }

    /// Replaces the local blocks above the common block with the peer chain,
    /// all or nothing
    fn update_chain(
        &self,
        snapshot: &Arc<LedgerSnapshot>,
        peer_chain: PeerChain,
    ) -> Result<SyncOutcome, SyncError> {
        if peer_chain.blocks.len() > self.config.max_blocks_per_sync {
            return Ok(SyncOutcome::RejectedInvalid(FailureReason::ChainTooLong));
        }
        let mut view = self.state.create_view();
        if view.base_generation() != snapshot.generation() {
            warn!("local chain changed during synchronization, update not possible");
            return Ok(SyncOutcome::NotNeeded(NotNeededReason::LocalChainChanged));
        }

        let reverted = view.drop_blocks_after(peer_chain.common_block_height);
        let mut our_score = ChainScore::ZERO;
        for stored in &reverted {
            self.executor.undo(&stored.block, &mut view);
            our_score = our_score.saturating_add(stored.score);
        }
        if !reverted.is_empty() {
            info!(
                "rolled back {} blocks down to height {}",
                reverted.len(),
                peer_chain.common_block_height
            );
        }

        let mut peer_score = ChainScore::ZERO;
        for block in &peer_chain.blocks {
            let parent = Arc::clone(&view.last_block().block);
            let mut result = self.capabilities.block_validator.validate(&parent, block);
            if result.is_success() {
                result = self
                    .capabilities
                    .transaction_validator
                    .validate(block, &view);
            }
            match result {
                ValidationResult::Success => {}
                ValidationResult::Neutral => {
                    info!("could not validate peer block {}", block.hash());
                    return Ok(SyncOutcome::NotNeeded(
                        NotNeededReason::ValidationInconclusive,
                    ));
                }
                ValidationResult::Failure(reason) => {
                    info!(
                        "peer block {} at height {} is invalid: {}",
                        block.hash(),
                        block.height(),
                        reason
                    );
                    return Ok(SyncOutcome::RejectedInvalid(reason));
                }
            }
            self.executor.execute(block, &mut view);
            let score = self
                .capabilities
                .scorer
                .calculate_block_score(&parent, block);
            view.push_block(block.clone(), score);
            peer_score = peer_score.saturating_add(score);
        }

        debug!("our score: {}, peer score: {}", our_score, peer_score);
        if peer_score == ChainScore::ZERO {
            return Ok(SyncOutcome::RejectedInvalid(FailureReason::ChainScoreInferior));
        }
        // an equal score is not enough
        if peer_score <= our_score {
            return Ok(SyncOutcome::NotNeeded(NotNeededReason::ScoreNotHigher));
        }

        let height = view.height();
        let score = view.score();
        match self.state.commit(view) {
            Ok(generation) => {
                ledger_trace!("sync.synchronizer.adopted", {
                    "generation": generation,
                    "height": height.to_u64(),
                    "rolled_back": reverted.len(),
                    "applied": peer_chain.blocks.len(),
                });
            }
            Err(LedgerStateError::StaleView { view, current }) => {
                warn!(
                    "local chain changed during synchronization (generation {} -> {})",
                    view, current
                );
                return Ok(SyncOutcome::NotNeeded(NotNeededReason::LocalChainChanged));
            }
            Err(err) => return Err(err.into()),
        }
        info!(
            "adopted {} blocks, rolled back {}, new height {}",
            peer_chain.blocks.len(),
            reverted.len(),
            height
        );

        self.reconcile_unconfirmed(&reverted, &peer_chain.blocks);
        Ok(SyncOutcome::Adopted {
            rolled_back: reverted.len(),
            applied: peer_chain.blocks.len(),
            height,
            score,
        })
    }

    /// Returns the transactions of rolled back blocks that the new chain does not
    /// confirm to the pool, and drops the ones it confirms
    fn reconcile_unconfirmed(&self, reverted: &[StoredBlock], adopted: &[Block]) {
        let confirmed: HashSet<Hash> = adopted
            .iter()
            .flat_map(|block| block.content.transactions.iter().map(|tx| tx.id))
            .collect();
        for stored in reverted {
            for transaction in &stored.block.content.transactions {
                if !confirmed.contains(&transaction.id) {
                    self.capabilities
                        .unconfirmed
                        .add_existing(transaction.clone());
                }
            }
        }
        for block in adopted {
            self.capabilities.unconfirmed.remove_all(block);
        }
    }
}
