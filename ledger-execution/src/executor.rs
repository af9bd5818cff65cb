// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::effects::{default_effects, StateEffect};
use crate::processor::BlockProcessor;
use crate::state_observer::StateObserver;
use ledger_logging::ledger_trace;
use ledger_models::notification::NotificationTrigger;
use ledger_models::observer::{AggregateBlockTransactionObserver, BlockTransactionObserver};
use ledger_models::Block;
use ledger_state::StateCache;

/// Applies and reverts whole blocks on a state cache.
///
/// Effects are applied directly to the cache, which is expected to be a private
/// view: a panic in the middle of a block leaves it half-applied, and the view
/// must then be dropped.
pub struct BlockExecutor {
    effects: Vec<Box<dyn StateEffect>>,
}

impl Default for BlockExecutor {
    fn default() -> Self {
        BlockExecutor::new(default_effects())
    }
}

impl BlockExecutor {
    /// Executor applying `effects`
    pub fn new(effects: Vec<Box<dyn StateEffect>>) -> Self {
        BlockExecutor { effects }
    }

    /// Applies `block`
    pub fn execute(&self, block: &Block, cache: &mut dyn StateCache) {
        self.process(block, cache, NotificationTrigger::Execute, None)
    }

    /// Applies `block`, also delivering every notification to `extra` after the state effects
    pub fn execute_with(
        &self,
        block: &Block,
        cache: &mut dyn StateCache,
        extra: &mut dyn BlockTransactionObserver,
    ) {
        self.process(block, cache, NotificationTrigger::Execute, Some(extra))
    }

    /// Reverts `block`, which must be the last block applied to `cache`
    pub fn undo(&self, block: &Block, cache: &mut dyn StateCache) {
        self.process(block, cache, NotificationTrigger::Undo, None)
    }

    /// Reverts `block`, also delivering every notification to `extra` after the state effects
    pub fn undo_with(
        &self,
        block: &Block,
        cache: &mut dyn StateCache,
        extra: &mut dyn BlockTransactionObserver,
    ) {
        self.process(block, cache, NotificationTrigger::Undo, Some(extra))
    }

    fn process(
        &self,
        block: &Block,
        cache: &mut dyn StateCache,
        trigger: NotificationTrigger,
        extra: Option<&mut dyn BlockTransactionObserver>,
    ) {
        let harvester = cache.find_forwarded_address(&block.signer(), block.height());
        ledger_trace!("execution.process_block", {
            "block": block.hash(),
            "height": block.height().to_u64(),
            "harvester": harvester,
            "undo": trigger == NotificationTrigger::Undo,
        });
        let processor = BlockProcessor::new(block, harvester, trigger);
        let mut state_observer = StateObserver::new(cache, &self.effects);
        match extra {
            Some(extra) => {
                let mut aggregate = AggregateBlockTransactionObserver::new()
                    .with(&mut state_observer)
                    .with(extra);
                processor.process(&mut aggregate);
            }
            None => processor.process(&mut state_observer),
        }
    }
}
