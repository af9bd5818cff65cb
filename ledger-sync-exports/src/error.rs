// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use ledger_models::ModelsError;
use ledger_state::LedgerStateError;
use ledger_time::TimeError;
use thiserror::Error;

/// Failure of a request sent to a peer
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    /// peer unreachable: {0}
    Unreachable(String),
    /// malformed response: {0}
    MalformedResponse(String),
    /// request refused by the peer: {0}
    Refused(String),
}

/// synchronizer error
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum SyncError {
    /// request to the peer timed out: {0}
    Timeout(String),
    /// connector error: {0}
    ConnectorError(#[from] ConnectorError),
    /// models error: {0}
    ModelsError(#[from] ModelsError),
    /// ledger state error: {0}
    LedgerStateError(#[from] LedgerStateError),
    /// time error: {0}
    TimeError(#[from] TimeError),
}

impl SyncError {
    /// Whether the error comes from the peer or the link to it rather than from the local node.
    /// Transient errors end the round without touching the local state.
    pub fn is_transient(&self) -> bool {
        match self {
            SyncError::Timeout(_) | SyncError::ConnectorError(_) | SyncError::ModelsError(_) => {
                true
            }
            SyncError::LedgerStateError(_) | SyncError::TimeError(_) => false,
        }
    }
}
