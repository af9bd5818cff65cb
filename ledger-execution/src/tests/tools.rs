// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_hash::Hash;
use ledger_models::test_exports::{address_of, create_block};
use ledger_models::{Amount, Block, BlockHeight, ChainScore};
use ledger_signature::KeyPair;
use ledger_state::{AccountState, LedgerState, LedgerStateConfig};
use ledger_time::LedgerTime;

pub const BLOCK_DELTA: LedgerTime = LedgerTime::from_millis(60_000);

pub struct TestLedger {
    pub state: LedgerState,
    pub genesis: Block,
    pub harvester: KeyPair,
}

/// Ledger with a genesis block and the given funded accounts
pub fn ledger_with(funded: &[(&KeyPair, u64)]) -> TestLedger {
    let harvester = KeyPair::generate();
    let genesis = create_block(
        &harvester,
        Hash::zero(),
        BlockHeight::GENESIS,
        LedgerTime::from_millis(0),
        1,
        vec![],
    );
    let state = LedgerState::new(
        LedgerStateConfig::default(),
        genesis.clone(),
        ChainScore::new(1),
        funded.iter().map(|(keypair, balance)| {
            AccountState::with_balance(address_of(keypair), Amount::from_raw(*balance))
        }),
    )
    .unwrap();
    TestLedger {
        state,
        genesis,
        harvester,
    }
}
