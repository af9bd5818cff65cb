// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::request::request;
use ledger_logging::ledger_trace;
use ledger_models::{BlockHeight, Node};
use ledger_state::{BlockChain, ChainLookup};
use ledger_sync_exports::{
    ComparisonResult, ComparisonResultCode, SyncConfig, SyncConnector, SyncError,
};
use tracing::debug;

/// Compares the local chain with the chain of a peer
pub struct BlockChainComparer<'a> {
    config: &'a SyncConfig,
    connector: &'a dyn SyncConnector,
}

impl<'a> BlockChainComparer<'a> {
    /// Comparer asking peers through `connector`
    pub fn new(config: &'a SyncConfig, connector: &'a dyn SyncConnector) -> Self {
        BlockChainComparer { config, connector }
    }

    /// Compares `local` with the chain of `node`.
    ///
    /// Checks, in order: the reported chain scores, the peer last block, whether
    /// both last blocks are the same, how far behind the peer is, and finally
    /// the hashes of both chains over the window that can still be rewritten,
    /// which locates the most recent common block.
    pub async fn compare(
        &self,
        local: &BlockChain,
        node: &Node,
    ) -> Result<ComparisonResult, SyncError> {
        let result = self.compare_chains(local, node).await?;
        debug!("compared chain with {}: {:?}", node, result.code);
        ledger_trace!("sync.comparer.compare", {
            "node": node.to_string(),
            "code": format!("{:?}", result.code),
            "common_block_height": result.common_block_height.map(|height| height.to_u64()),
        });
        Ok(result)
    }

    async fn compare_chains(
        &self,
        local: &BlockChain,
        node: &Node,
    ) -> Result<ComparisonResult, SyncError> {
        let timeout = self.config.request_timeout;

        let local_score = local.score();
        let remote_score = request(
            timeout,
            "get_chain_score",
            self.connector.get_chain_score(node),
        )
        .await?;
        if remote_score < local_score {
            return Ok(ComparisonResult::new(
                ComparisonResultCode::RemoteReportedLowerChainScore,
                None,
            ));
        }
        if remote_score == local_score {
            return Ok(ComparisonResult::new(
                ComparisonResultCode::RemoteReportedEqualChainScore,
                None,
            ));
        }

        let remote_last = match request(
            timeout,
            "get_last_block",
            self.connector.get_last_block(node),
        )
        .await?
        {
            Some(block) => block,
            None => {
                return Ok(ComparisonResult::new(
                    ComparisonResultCode::RemoteHasNoBlocks,
                    None,
                ))
            }
        };
        let remote_height = remote_last.height();
        if remote_last.verify_signature().is_err() {
            return Ok(ComparisonResult::new(
                ComparisonResultCode::RemoteHasNonVerifiableBlock,
                Some(remote_height),
            ));
        }

        let local_last = local.last_block();
        if local_last.block.hash() == remote_last.hash() {
            return Ok(ComparisonResult::new(
                ComparisonResultCode::RemoteIsSynced,
                Some(remote_height),
            ));
        }

        let local_height = local.height();
        let rewrite = self.config.max_blocks_to_rewrite;
        if local_height
            .checked_sub(remote_height)
            .map_or(false, |behind| behind > rewrite)
        {
            return Ok(ComparisonResult::new(
                ComparisonResultCode::RemoteIsTooFarBehind,
                Some(remote_height),
            ));
        }

        let start = local_height
            .saturating_sub_blocks(rewrite)
            .max(BlockHeight::GENESIS);
        let remote_hashes = request(
            timeout,
            "get_hashes_from",
            self.connector.get_hashes_from(node, start),
        )
        .await?;
        if remote_hashes.len() > self.config.max_blocks_to_analyze {
            return Ok(ComparisonResult::new(
                ComparisonResultCode::RemoteReturnedTooManyHashes,
                Some(remote_height),
            ));
        }

        let local_hashes = local.hashes_from(start, self.config.max_blocks_to_analyze);
        let common_index = match local_hashes.find_last_common(&remote_hashes) {
            Some(index) => index,
            None => {
                return Ok(ComparisonResult::new(
                    ComparisonResultCode::RemoteReturnedInvalidHashes,
                    Some(remote_height),
                ))
            }
        };
        if common_index + 1 == remote_hashes.len() {
            // every hash the peer sent is ours, so its better score cannot be real
            return Ok(ComparisonResult::new(
                ComparisonResultCode::RemoteLiedAboutChainScore,
                Some(remote_height),
            ));
        }

        let common_block_height = BlockHeight::new(start.to_u64() + common_index as u64);
        Ok(ComparisonResult::not_synced(
            common_block_height,
            local_height,
            remote_height,
        ))
    }
}
