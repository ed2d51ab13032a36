use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one chain within the braided set.
///
/// `Ord` on the inner id is the canonical total order; everywhere chains
/// need an ordering (adjacent records, graph traversal tie-breaks) it is
/// this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u32);

impl ChainId {
    /// Canonical wire encoding, used inside Merkle tags and leaf contents.
    pub fn encode(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain-{}", self.0)
    }
}
