// Copyright (c) 2022 MASSA LABS <info@massa.net>

mod remote_node;
mod tools;

pub use remote_node::InMemoryNode;
pub use tools::*;
