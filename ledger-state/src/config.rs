// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This file defines a configuration structure containing all settings for the ledger state

use serde::Deserialize;

/// Ledger state configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerStateConfig {
    /// number of blocks after which an importance transfer becomes effective
    /// for forwarded-account lookups
    pub remote_harvesting_delay: u64,
}

#[cfg(any(test, feature = "test-exports"))]
impl Default for LedgerStateConfig {
    fn default() -> Self {
        LedgerStateConfig {
            remote_harvesting_delay: 3,
        }
    }
}
