// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::test_exports::{
    extend_chain, init_tracing, test_node, InMemoryNode, TestLedger, TEST_DIFFICULTY,
    TEST_GENESIS_SCORE,
};
use crate::BlockChainComparer;
use ledger_models::{Block, BlockHeight, ChainScore};
use ledger_signature::KeyPair;
use ledger_sync_exports::{ComparisonResult, ComparisonResultCode, SyncConfig};

/// Local chain of 30 blocks on top of genesis (heights 2 to 31)
fn local_ledger() -> (TestLedger, Vec<Block>) {
    init_tracing();
    let ledger = TestLedger::new(SyncConfig::default(), vec![]);
    let local = extend_chain(&KeyPair::generate(), &ledger.genesis, 30, TEST_DIFFICULTY);
    ledger.append(&local);
    (ledger, local)
}

/// Peer chain made of genesis, `shared` and `extension`
fn remote(ledger: &TestLedger, shared: &[Block], extension: Vec<Block>) -> InMemoryNode {
    let mut blocks = vec![ledger.genesis.clone()];
    blocks.extend_from_slice(shared);
    blocks.extend(extension);
    InMemoryNode::new(blocks, &ledger.scorer(), TEST_GENESIS_SCORE)
}

async fn compare(ledger: &TestLedger, remote: &InMemoryNode) -> ComparisonResult {
    let snapshot = ledger.state.snapshot();
    BlockChainComparer::new(&ledger.config, remote)
        .compare(snapshot.chain(), &test_node())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_remote_with_lower_or_equal_score() {
    let (ledger, local) = local_ledger();

    let shorter = remote(&ledger, &local[..20], vec![]);
    let result = compare(&ledger, &shorter).await;
    assert_eq!(result.code, ComparisonResultCode::RemoteReportedLowerChainScore);
    assert_eq!(result.common_block_height, None);

    let same = remote(&ledger, &local, vec![]);
    assert_eq!(
        compare(&ledger, &same).await.code,
        ComparisonResultCode::RemoteReportedEqualChainScore
    );
}

#[tokio::test]
async fn test_remote_last_block_checks() {
    let (ledger, local) = local_ledger();

    let mut empty = remote(&ledger, &[], vec![]);
    empty.blocks.clear();
    empty.score = ChainScore::new(10_000);
    assert_eq!(
        compare(&ledger, &empty).await.code,
        ComparisonResultCode::RemoteHasNoBlocks
    );

    let mut tampered = remote(
        &ledger,
        &local,
        extend_chain(&KeyPair::generate(), &local[29], 2, TEST_DIFFICULTY),
    );
    if let Some(last) = tampered.blocks.last_mut() {
        last.content.difficulty += 1;
    }
    let result = compare(&ledger, &tampered).await;
    assert_eq!(result.code, ComparisonResultCode::RemoteHasNonVerifiableBlock);
    assert!(result.code.is_evil());

    let mut synced = remote(&ledger, &local, vec![]);
    synced.score = ChainScore::new(10_000);
    assert_eq!(
        compare(&ledger, &synced).await.code,
        ComparisonResultCode::RemoteIsSynced
    );
}

#[tokio::test]
async fn test_remote_too_far_behind() {
    let (ledger, local) = local_ledger();
    // peer at height 15, local at 31, 10 blocks can be rewritten
    let mut behind = remote(&ledger, &local[..14], vec![]);
    behind.score = ChainScore::new(10_000);
    let result = compare(&ledger, &behind).await;
    assert_eq!(result.code, ComparisonResultCode::RemoteIsTooFarBehind);
    assert_eq!(result.remote_height, Some(BlockHeight::new(15)));
}

#[tokio::test]
async fn test_remote_hash_checks() {
    let (ledger, local) = local_ledger();

    let longer = remote(
        &ledger,
        &local,
        extend_chain(&KeyPair::generate(), &local[29], 30, TEST_DIFFICULTY),
    );
    assert_eq!(
        compare(&ledger, &longer).await.code,
        ComparisonResultCode::RemoteReturnedTooManyHashes
    );

    let unrelated = remote(
        &ledger,
        &[],
        extend_chain(&KeyPair::generate(), &ledger.genesis, 35, TEST_DIFFICULTY),
    );
    let result = compare(&ledger, &unrelated).await;
    assert_eq!(result.code, ComparisonResultCode::RemoteReturnedInvalidHashes);
    assert!(!result.code.is_evil());

    // all the hashes of the peer are ours: a better score is impossible
    let mut liar = remote(&ledger, &local[..24], vec![]);
    liar.score = ChainScore::new(10_000);
    let result = compare(&ledger, &liar).await;
    assert_eq!(result.code, ComparisonResultCode::RemoteLiedAboutChainScore);
    assert!(result.code.is_evil());
}

#[tokio::test]
async fn test_remote_not_synced() {
    let (ledger, local) = local_ledger();

    let ahead = remote(
        &ledger,
        &local,
        extend_chain(&KeyPair::generate(), &local[29], 5, TEST_DIFFICULTY),
    );
    let result = compare(&ledger, &ahead).await;
    assert_eq!(result.code, ComparisonResultCode::RemoteIsNotSynced);
    assert_eq!(result.common_block_height, Some(BlockHeight::new(31)));
    assert!(result.chains_consistent);

    // fork after height 28
    let fork = remote(
        &ledger,
        &local[..27],
        extend_chain(&KeyPair::generate(), &local[26], 5, TEST_DIFFICULTY),
    );
    let result = compare(&ledger, &fork).await;
    assert_eq!(result.code, ComparisonResultCode::RemoteIsNotSynced);
    assert_eq!(result.common_block_height, Some(BlockHeight::new(28)));
    assert!(!result.chains_consistent);
    assert_eq!(result.remote_height, Some(BlockHeight::new(33)));
}
