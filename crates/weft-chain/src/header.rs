use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use weft_merkle::{MerkleHash, MerkleTree, ProofFrame, TaggedLeaf};

use crate::{chain_id::ChainId, error::ChainError, tag::MerkleTag};

/// A fixed-width block digest: the root of the block's header tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub MerkleHash);

impl BlockHash {
    /// The parent hash of every genesis header.
    pub const ZERO: BlockHash = BlockHash([0u8; 32]);

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Which child of a header a proof frame splices through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    PayloadHash,
    Parent,
    Adjacent(ChainId),
}

// Leaf layout of the header tree: chain id, height, created, payload hash,
// parent, then one leaf per adjacent entry in adjacent-record order.
const PAYLOAD_POSITION: usize = 3;
const PARENT_POSITION: usize = 4;
const ADJACENT_BASE: usize = 5;

/// One block header of the braid.
///
/// Merkle-encodable: the root of [`header_tree`](Self::header_tree) is the
/// header's [`BlockHash`]. Every non-genesis header carries one adjacent
/// entry per graph neighbour, naming that chain's block at the previous
/// height; the `BTreeMap` order is the canonical adjacent-record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub chain: ChainId,

    pub height: u64,

    /// Unix timestamp (seconds) when this block was created.
    pub created: i64,

    /// Hash of the block's [`crate::BlockPayload`].
    pub payload_hash: BlockHash,

    /// Hash of the header below this one; all-zero for genesis.
    pub parent: BlockHash,

    pub adjacents: BTreeMap<ChainId, BlockHash>,
}

impl BlockHeader {
    /// The height-0 header of a chain: all-zero parent, no adjacent record.
    pub fn genesis(chain: ChainId, payload_hash: BlockHash, created: i64) -> Self {
        Self {
            chain,
            height: 0,
            created,
            payload_hash,
            parent: BlockHash::ZERO,
            adjacents: BTreeMap::new(),
        }
    }

    /// The Merkle encoding of this header.
    pub fn header_tree(&self) -> Result<MerkleTree, ChainError> {
        let mut leaves = vec![
            TaggedLeaf::bytes(MerkleTag::Chain.bytes(), self.chain.encode().to_vec()),
            TaggedLeaf::bytes(MerkleTag::Height.bytes(), self.height.to_le_bytes().to_vec()),
            TaggedLeaf::bytes(MerkleTag::Created.bytes(), self.created.to_le_bytes().to_vec()),
            TaggedLeaf::sub_root(MerkleTag::BlockPayloadHash.bytes(), self.payload_hash.0),
            TaggedLeaf::sub_root(MerkleTag::Parent.bytes(), self.parent.0),
        ];
        for (chain, hash) in &self.adjacents {
            leaves.push(TaggedLeaf::sub_root(
                MerkleTag::AdjacentParent(*chain).bytes(),
                hash.0,
            ));
        }
        Ok(MerkleTree::build(&leaves)?)
    }

    pub fn block_hash(&self) -> Result<BlockHash, ChainError> {
        Ok(BlockHash(self.header_tree()?.root()?))
    }

    /// Positional index of `chain` inside this header's adjacent record.
    pub fn adjacent_index(&self, chain: ChainId) -> Option<usize> {
        self.adjacents.keys().position(|c| *c == chain)
    }

    /// The proof frame that splices through the given child of this header.
    ///
    /// The adjacent position is derived from
    /// [`adjacent_index`](Self::adjacent_index) over the same record order
    /// the header tree is built from, so the two cannot drift apart.
    pub fn frame(&self, field: HeaderField) -> Result<ProofFrame, ChainError> {
        let position = match field {
            HeaderField::PayloadHash => PAYLOAD_POSITION,
            HeaderField::Parent => PARENT_POSITION,
            HeaderField::Adjacent(chain) => {
                let index = self
                    .adjacent_index(chain)
                    .ok_or(ChainError::NotAdjacent(self.chain, chain))?;
                ADJACENT_BASE + index
            }
        };
        Ok(ProofFrame::new(position, self.header_tree()?))
    }
}
