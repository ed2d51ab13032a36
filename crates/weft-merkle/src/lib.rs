pub mod error;
pub mod hash;
pub mod proof;
pub mod tree;

pub use error::MerkleError;
pub use hash::{hash_leaf, hash_node, MerkleHash, MerkleHasher, Sha512Trunc256, HASH_LENGTH};
pub use proof::{MerkleProof, ProofFrame};
pub use tree::{LeafData, MerkleTree, TaggedLeaf};
