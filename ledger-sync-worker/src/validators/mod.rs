// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Checks run on every peer block before it is executed.

mod block;
mod projection;
mod transaction;

pub use block::DefaultBlockValidator;
pub use transaction::DefaultTransactionValidator;
