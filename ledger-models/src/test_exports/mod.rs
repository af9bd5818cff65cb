// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Fixtures and recording observers shared by the tests of the ledger crates.

mod data;
mod observers;

pub use data::*;
pub use observers::*;
