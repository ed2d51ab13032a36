use thiserror::Error;

use crate::chain_id::ChainId;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("merkle error: {0}")]
    Merkle(#[from] weft_merkle::MerkleError),

    #[error("unknown chain {0}")]
    UnknownChain(ChainId),

    #[error("no route from {from} to {to}")]
    Unreachable { from: ChainId, to: ChainId },

    #[error("{0} has no adjacent entry for {1}")]
    NotAdjacent(ChainId, ChainId),

    #[error("self edge on {0}")]
    SelfEdge(ChainId),

    #[error("leaf index {index} out of range for a body of {len} entries")]
    LeafOutOfRange { index: usize, len: usize },
}
