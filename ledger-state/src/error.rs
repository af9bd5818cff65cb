// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// ledger state error
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum LedgerStateError {
    /// view was created at generation {view} but the state is now at generation {current}
    StaleView {
        /// generation the view was created from
        view: u64,
        /// current generation of the state
        current: u64,
    },
    /// invalid genesis block: {0}
    InvalidGenesis(String),
}
