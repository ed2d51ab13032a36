use serde::{Deserialize, Serialize};
use weft_chain::ChainId;
use weft_merkle::MerkleProof;

/// SPV witness that a transaction is included in canonical history
/// reachable from the current head of the named target chain.
///
/// Opaque to callers; any outer encoding that round-trips the chain id and
/// every frame byte-exact will do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionProof {
    /// The chain whose current frontier must hold the header this proof
    /// folds to.
    pub chain: ChainId,
    pub proof: MerkleProof,
}

/// SPV witness for a transaction output; same shape as
/// [`TransactionProof`], built over the outputs body tree instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutputProof {
    pub chain: ChainId,
    pub proof: MerkleProof,
}
