use sha2::{Digest, Sha512_256};

/// Width of every digest in the tree, in bytes.
pub const HASH_LENGTH: usize = 32;

/// A raw tree-node digest.
pub type MerkleHash = [u8; HASH_LENGTH];

/// Domain-separation prefix for leaf nodes.
const LEAF_PREFIX: u8 = 0x00;

/// Domain-separation prefix for inner nodes.
const NODE_PREFIX: u8 = 0x01;

/// The digest algorithm the tree is built over.
///
/// Only [`Sha512Trunc256`] ships, but keeping the algorithm behind a trait
/// keeps the tree and proof types honest about what they require of it.
pub trait MerkleHasher {
    fn digest(data: &[u8]) -> MerkleHash;
}

/// SHA-512/256: SHA-512 with distinct initial values, truncated to 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha512Trunc256;

impl MerkleHasher for Sha512Trunc256 {
    fn digest(data: &[u8]) -> MerkleHash {
        Sha512_256::digest(data).into()
    }
}

/// Hash a leaf: `H(0x00 || tag || content)`.
///
/// The tag names the semantic field the leaf occupies, so a leaf can never
/// collide with an inner node or with a leaf of a different field.
pub fn hash_leaf<H: MerkleHasher>(tag: &[u8], content: &[u8]) -> MerkleHash {
    let mut buf = Vec::with_capacity(1 + tag.len() + content.len());
    buf.push(LEAF_PREFIX);
    buf.extend_from_slice(tag);
    buf.extend_from_slice(content);
    H::digest(&buf)
}

/// Hash an inner node: `H(0x01 || left || right)`.
pub fn hash_node<H: MerkleHasher>(left: &MerkleHash, right: &MerkleHash) -> MerkleHash {
    let mut buf = Vec::with_capacity(1 + 2 * HASH_LENGTH);
    buf.push(NODE_PREFIX);
    buf.extend_from_slice(left);
    buf.extend_from_slice(right);
    H::digest(&buf)
}
