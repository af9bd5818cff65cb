// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_signature::PublicKey;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// `NodeId` wraps a public key to uniquely identify a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(PublicKey);

impl NodeId {
    /// Create a new `NodeId` from a public key.
    pub fn new(public_key: PublicKey) -> Self {
        Self(public_key)
    }

    /// Get the public key of the `NodeId`.
    pub fn get_public_key(&self) -> PublicKey {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A peer the node can synchronize with
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// identity of the peer
    pub id: NodeId,
    /// where to reach it
    pub endpoint: SocketAddr,
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.endpoint)
    }
}
