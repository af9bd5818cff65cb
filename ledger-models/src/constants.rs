// Copyright (c) 2022 MASSA LABS <info@massa.net>

/// Fixed-point factor of `Amount`: one coin is `AMOUNT_DECIMAL_FACTOR` raw units
pub const AMOUNT_DECIMAL_FACTOR: u64 = 1_000_000;

/// Prefix of the string form of an `Address`
pub const ADDRESS_PREFIX: &str = "NA";

/// Height of the first block of any chain
pub const GENESIS_HEIGHT: u64 = 1;
