use thiserror::Error;
use weft_chain::ChainError;
use weft_store::StoreError;

#[derive(Debug, Error)]
pub enum SpvError {
    /// The source block cannot be linked to the target chain's current
    /// head. Retrying against a later head, or with different source
    /// parameters, may succeed.
    #[error("target not reachable: {0}")]
    TargetNotReachable(&'static str),

    /// The local store is corrupt: a body the data model mandates is
    /// missing, or does not match its commitment. Not recoverable by
    /// retrying.
    #[error("inconsistent payload data: {0}")]
    InconsistentPayloadData(&'static str),

    /// The proof does not witness a header on the target chain. The caller
    /// should obtain a newer proof.
    #[error("proof verification failed: {0}")]
    VerificationFailed(&'static str),

    /// A data-model invariant failed inside the header index.
    #[error("internal invariant violated: {0}")]
    Invariant(#[from] StoreError),

    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("merkle error: {0}")]
    Merkle(#[from] weft_merkle::MerkleError),
}
