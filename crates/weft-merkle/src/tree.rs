use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::{
    error::MerkleError,
    hash::{hash_leaf, hash_node, MerkleHash, MerkleHasher, Sha512Trunc256},
};

/// The value side of a tagged leaf: raw field bytes, or the root of a
/// subordinate tree spliced in as a child of this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafData {
    Bytes(Vec<u8>),
    SubRoot(MerkleHash),
}

/// A leaf together with its Merkle-universe tag.
///
/// Both variants hash the same way (`H(0x00 || tag || content)`); the
/// distinction only records whether the content is an opaque byte string or
/// the root of another tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedLeaf {
    pub tag: Vec<u8>,
    pub data: LeafData,
}

impl TaggedLeaf {
    pub fn bytes(tag: Vec<u8>, content: Vec<u8>) -> Self {
        Self {
            tag,
            data: LeafData::Bytes(content),
        }
    }

    pub fn sub_root(tag: Vec<u8>, root: MerkleHash) -> Self {
        Self {
            tag,
            data: LeafData::SubRoot(root),
        }
    }

    pub fn content(&self) -> &[u8] {
        match &self.data {
            LeafData::Bytes(bytes) => bytes,
            LeafData::SubRoot(root) => root,
        }
    }

    pub fn leaf_hash<H: MerkleHasher>(&self) -> MerkleHash {
        hash_leaf::<H>(&self.tag, self.content())
    }
}

/// A binary Merkle tree over a sequence of [`TaggedLeaf`]s.
///
/// Leaf contents are not retained; only per-leaf tags and every level of
/// hashes, `levels[0]` being the leaf hashes and `levels[last]` the single
/// root. When a level has odd width the last node is duplicated, so every
/// pairing step sees an even width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MerkleTree<H: MerkleHasher = Sha512Trunc256> {
    tags: Vec<Vec<u8>>,
    levels: Vec<Vec<MerkleHash>>,
    #[serde(skip)]
    hasher: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Build a tree from `leaves`. Returns an error if the slice is empty.
    pub fn build(leaves: &[TaggedLeaf]) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::Empty);
        }

        let tags = leaves.iter().map(|leaf| leaf.tag.clone()).collect();
        let mut current: Vec<MerkleHash> = leaves.iter().map(|leaf| leaf.leaf_hash::<H>()).collect();
        let mut levels = vec![current.clone()];

        while current.len() > 1 {
            // Duplicate the last node when the level has odd width.
            if current.len() % 2 != 0 {
                let last = *current.last().unwrap();
                current.push(last);
            }

            let parent_level: Vec<MerkleHash> = current
                .chunks(2)
                .map(|pair| hash_node::<H>(&pair[0], &pair[1]))
                .collect();

            levels.push(parent_level.clone());
            current = parent_level;
        }

        Ok(Self {
            tags,
            levels,
            hasher: PhantomData,
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.tags.len()
    }

    /// The root hash. Errors only on a structurally empty tree, which
    /// `build` never produces but hand-deserialized values can.
    pub fn root(&self) -> Result<MerkleHash, MerkleError> {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .ok_or(MerkleError::Empty)
    }

    /// The Merkle-universe tag of the leaf at `position`.
    pub fn tag_at(&self, position: usize) -> Result<&[u8], MerkleError> {
        self.tags
            .get(position)
            .map(|tag| tag.as_slice())
            .ok_or(MerkleError::PositionOutOfRange {
                position,
                leaves: self.tags.len(),
            })
    }

    /// The stored leaf hash at `position`.
    pub fn leaf_hash_at(&self, position: usize) -> Result<MerkleHash, MerkleError> {
        self.levels
            .first()
            .and_then(|level| level.get(position))
            .copied()
            .ok_or(MerkleError::PositionOutOfRange {
                position,
                leaves: self.leaf_count(),
            })
    }

    /// Recompute the root with `leaf_hash` substituted at `position`.
    ///
    /// Only the path from `position` to the root is rehashed; siblings come
    /// from the stored levels. Equals `build` over the edited leaf sequence.
    pub fn root_substituting(
        &self,
        position: usize,
        leaf_hash: MerkleHash,
    ) -> Result<MerkleHash, MerkleError> {
        let width = self.levels.first().map_or(0, |level| level.len());
        if position >= width {
            return Err(MerkleError::PositionOutOfRange {
                position,
                leaves: width,
            });
        }

        let mut current = leaf_hash;
        let mut index = position;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
            // The odd tail of a level pairs with itself; under substitution
            // that duplicate is the running hash.
            let sibling = if sibling_index >= level.len() {
                current
            } else {
                level[sibling_index]
            };

            current = if index % 2 == 0 {
                hash_node::<H>(&current, &sibling)
            } else {
                hash_node::<H>(&sibling, &current)
            };

            index /= 2;
        }

        Ok(current)
    }
}
