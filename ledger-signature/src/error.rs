// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// Signature error
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum SignatureError {
    /// parsing error: {0}
    ParsingError(String),

    /// signature engine error: {0}
    EngineError(#[from] ed25519_dalek::SignatureError),
}
