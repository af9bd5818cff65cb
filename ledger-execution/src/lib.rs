// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Block execution: the effect appliers that turn notifications into state
//! mutations, the block processor ordering those notifications, and the block
//! executor applying or reverting a whole block.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

pub mod effects;
mod executor;
mod processor;
mod state_observer;

pub use effects::{default_effects, StateEffect};
pub use executor::BlockExecutor;
pub use processor::BlockProcessor;
pub use state_observer::StateObserver;

#[cfg(test)]
mod tests;
