// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// models result
pub type ModelsResult<T, E = ModelsError> = core::result::Result<T, E>;

/// models error
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum ModelsError {
    /// Serialization error: {0}
    SerializeError(String),
    /// Deserialization error: {0}
    DeserializeError(String),
    /// hash error: {0}
    HashError(#[from] ledger_hash::HashError),
    /// signature error: {0}
    SignatureError(#[from] ledger_signature::SignatureError),
    /// Time error {0}
    TimeError(#[from] ledger_time::TimeError),
    /// amount parse error: {0}
    AmountParseError(String),
    /// Ledger changes, Amount overflow
    AmountOverflowError,
    /// Wrong prefix: expected {0}, got {1}
    WrongPrefix(String, String),
    /// content id mismatch: expected {expected}, computed {computed}
    IdMismatch {
        /// id carried by the shared content
        expected: ledger_hash::Hash,
        /// id recomputed from the content
        computed: ledger_hash::Hash,
    },
}
