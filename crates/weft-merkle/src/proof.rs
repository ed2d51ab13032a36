use serde::{Deserialize, Serialize};

use crate::{
    error::MerkleError,
    hash::{hash_leaf, MerkleHash, MerkleHasher, Sha512Trunc256},
    tree::{MerkleTree, TaggedLeaf},
};

/// One level of a proof: which tree to climb through and at which leaf slot
/// the running hash is spliced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ProofFrame<H: MerkleHasher = Sha512Trunc256> {
    pub position: usize,
    pub tree: MerkleTree<H>,
}

impl<H: MerkleHasher> ProofFrame<H> {
    pub fn new(position: usize, tree: MerkleTree<H>) -> Self {
        Self { position, tree }
    }
}

/// An inclusion proof: a subject leaf and the ordered frames that fold it
/// outward into a single root.
///
/// The subject is hashed once, spliced into the first frame at its position,
/// and the resulting root becomes the next frame's input, re-tagged with the
/// Merkle-universe tag of the slot it occupies there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MerkleProof<H: MerkleHasher = Sha512Trunc256> {
    pub subject: TaggedLeaf,
    pub frames: Vec<ProofFrame<H>>,
}

impl<H: MerkleHasher> MerkleProof<H> {
    /// Assemble a proof, rejecting an empty frame list and any frame whose
    /// position does not name a leaf of its tree.
    pub fn new(subject: TaggedLeaf, frames: Vec<ProofFrame<H>>) -> Result<Self, MerkleError> {
        if frames.is_empty() {
            return Err(MerkleError::NoFrames);
        }
        for frame in &frames {
            if frame.position >= frame.tree.leaf_count() {
                return Err(MerkleError::PositionOutOfRange {
                    position: frame.position,
                    leaves: frame.tree.leaf_count(),
                });
            }
        }
        Ok(Self { subject, frames })
    }

    /// Fold the proof into its claimed root.
    ///
    /// Pure in the proof value; re-validates frame positions so that a
    /// hand-deserialized proof fails instead of panicking.
    pub fn run(&self) -> Result<MerkleHash, MerkleError> {
        if self.frames.is_empty() {
            return Err(MerkleError::NoFrames);
        }

        let mut current = self.subject.leaf_hash::<H>();
        for (depth, frame) in self.frames.iter().enumerate() {
            if depth > 0 {
                let tag = frame.tree.tag_at(frame.position)?;
                current = hash_leaf::<H>(tag, &current);
            }
            current = frame.tree.root_substituting(frame.position, current)?;
        }
        Ok(current)
    }
}
