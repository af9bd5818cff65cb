// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{
    ChainScoreMode, ComparisonResult, ComparisonResultCode, ConnectorError, DivergenceReason,
    MockNodeSelector, MockSyncConnector, NodeInteractionResult, NodeSelector, NotNeededReason,
    SyncConfig, SyncConnector, SyncError, SyncOutcome,
};
use assert_matches::assert_matches;
use ledger_models::validation::FailureReason;
use ledger_models::{BlockHeight, ChainScore, Node, NodeId};
use ledger_signature::KeyPair;
use ledger_time::LedgerTime;

fn test_node() -> Node {
    Node {
        id: NodeId::new(KeyPair::generate().get_public_key()),
        endpoint: "127.0.0.1:7890".parse().unwrap(),
    }
}

#[test]
fn test_config_deserialization() {
    let config: SyncConfig = serde_json::from_str(
        r#"{
            "max_blocks_to_analyze": 360,
            "max_blocks_to_rewrite": 360,
            "max_blocks_per_sync": 400,
            "max_transactions_per_block": 120,
            "request_timeout": 10000,
            "max_time_ahead": 60000,
            "score_mode": "time_adjusted_difficulty"
        }"#,
    )
    .unwrap();
    assert_eq!(config.max_blocks_to_rewrite, 360);
    assert_eq!(config.request_timeout, LedgerTime::from_millis(10_000));
    assert_eq!(config.score_mode, ChainScoreMode::TimeAdjustedDifficulty);
}

#[test]
fn test_transient_errors() {
    assert!(SyncError::Timeout("get_chain_score".into()).is_transient());
    assert!(SyncError::from(ConnectorError::Unreachable("reset".into())).is_transient());
    assert!(!SyncError::from(ledger_state::LedgerStateError::StaleView { view: 1, current: 2 })
        .is_transient());
}

#[test]
fn test_interaction_results() {
    let adopted = SyncOutcome::Adopted {
        rolled_back: 2,
        applied: 5,
        height: BlockHeight::new(103),
        score: ChainScore::new(1_000),
    };
    assert_eq!(adopted.interaction_result(), NodeInteractionResult::Success);
    assert_eq!(
        SyncOutcome::NotNeeded(NotNeededReason::ScoreNotHigher).interaction_result(),
        NodeInteractionResult::Neutral
    );
    assert_eq!(
        SyncOutcome::RejectedTooDivergent(DivergenceReason::NoCommonAncestor).interaction_result(),
        NodeInteractionResult::Neutral
    );
    assert_eq!(
        SyncOutcome::RejectedInvalid(FailureReason::ChainScoreInferior).interaction_result(),
        NodeInteractionResult::Failure
    );
}

#[test]
fn test_outcome_of_comparison_codes() {
    assert_eq!(
        SyncOutcome::from_comparison(ComparisonResultCode::RemoteIsNotSynced),
        None
    );
    assert_matches!(
        SyncOutcome::from_comparison(ComparisonResultCode::RemoteLiedAboutChainScore),
        Some(SyncOutcome::RejectedInvalid(_))
    );
    assert_matches!(
        SyncOutcome::from_comparison(ComparisonResultCode::RemoteReturnedInvalidHashes),
        Some(SyncOutcome::RejectedTooDivergent(DivergenceReason::NoCommonAncestor))
    );
    for code in [
        ComparisonResultCode::RemoteHasNonVerifiableBlock,
        ComparisonResultCode::RemoteReturnedTooManyHashes,
        ComparisonResultCode::RemoteLiedAboutChainScore,
    ] {
        assert!(code.is_evil());
        assert_eq!(
            SyncOutcome::from_comparison(code).map(|outcome| outcome.interaction_result()),
            Some(NodeInteractionResult::Failure)
        );
    }
    assert!(!ComparisonResultCode::RemoteIsTooFarBehind.is_evil());
}

#[test]
fn test_not_synced_consistency() {
    let consistent =
        ComparisonResult::not_synced(BlockHeight::new(100), BlockHeight::new(100), BlockHeight::new(103));
    assert!(consistent.chains_consistent);
    let forked =
        ComparisonResult::not_synced(BlockHeight::new(98), BlockHeight::new(100), BlockHeight::new(103));
    assert!(!forked.chains_consistent);
    assert_eq!(forked.common_block_height, Some(BlockHeight::new(98)));
}

#[tokio::test]
async fn test_mocked_capabilities() {
    let node = test_node();
    let mut selector = MockNodeSelector::new();
    let selected = node.clone();
    selector
        .expect_select_node()
        .times(1)
        .returning(move || Some(selected.clone()));
    assert_eq!(selector.select_node(), Some(node.clone()));

    let mut connector = MockSyncConnector::new();
    connector
        .expect_get_chain_score()
        .returning(|_| Ok(ChainScore::new(42)));
    connector
        .expect_get_last_block()
        .returning(|_| Err(ConnectorError::Refused("busy".into())));
    assert_eq!(
        connector.get_chain_score(&node).await,
        Ok(ChainScore::new(42))
    );
    assert_matches!(
        connector.get_last_block(&node).await,
        Err(ConnectorError::Refused(_))
    );
}
