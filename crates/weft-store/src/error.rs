use thiserror::Error;
use weft_chain::{BlockHash, ChainError, ChainId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown chain {0}")]
    UnknownChain(ChainId),

    #[error("header {0} not found on {1}")]
    HeaderNotFound(BlockHash, ChainId),

    #[error("genesis header on {0} has no parent")]
    GenesisHasNoParent(ChainId),

    #[error("header on {chain} has no adjacent entry for {adjacent}")]
    AdjacentMissing { chain: ChainId, adjacent: ChainId },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("chain error: {0}")]
    Chain(#[from] ChainError),
}
