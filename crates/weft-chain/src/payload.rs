use serde::{Deserialize, Serialize};
use weft_merkle::{MerkleTree, ProofFrame, TaggedLeaf};

use crate::{
    error::ChainError,
    header::BlockHash,
    tag::MerkleTag,
    transaction::{Transaction, TransactionOutput},
};

/// Which child of a payload a proof frame splices through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadField {
    TransactionsRoot,
    OutputsRoot,
}

const TRANSACTIONS_POSITION: usize = 0;
const OUTPUTS_POSITION: usize = 1;

/// The body commitment of one block: the roots of its transaction and
/// output body trees.
///
/// Its own hash is the `payload_hash` child of the owning header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPayload {
    pub transactions_root: BlockHash,
    pub outputs_root: BlockHash,
}

impl BlockPayload {
    pub fn new(transactions_root: BlockHash, outputs_root: BlockHash) -> Self {
        Self {
            transactions_root,
            outputs_root,
        }
    }

    /// The Merkle encoding of this payload.
    pub fn payload_tree(&self) -> Result<MerkleTree, ChainError> {
        let leaves = [
            TaggedLeaf::sub_root(MerkleTag::TransactionsRoot.bytes(), self.transactions_root.0),
            TaggedLeaf::sub_root(MerkleTag::OutputsRoot.bytes(), self.outputs_root.0),
        ];
        Ok(MerkleTree::build(&leaves)?)
    }

    pub fn hash(&self) -> Result<BlockHash, ChainError> {
        Ok(BlockHash(self.payload_tree()?.root()?))
    }

    /// The proof frame that splices through the given child of this payload.
    pub fn frame(&self, field: PayloadField) -> Result<ProofFrame, ChainError> {
        let position = match field {
            PayloadField::TransactionsRoot => TRANSACTIONS_POSITION,
            PayloadField::OutputsRoot => OUTPUTS_POSITION,
        };
        Ok(ProofFrame::new(position, self.payload_tree()?))
    }
}

/// The ordered, encoded transaction bodies of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTransactions {
    entries: Vec<Vec<u8>>,
}

impl BlockTransactions {
    pub fn new(entries: Vec<Vec<u8>>) -> Self {
        Self { entries }
    }

    pub fn from_transactions(transactions: &[Transaction]) -> Result<Self, ChainError> {
        let entries = transactions
            .iter()
            .map(Transaction::encode)
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.entries.get(index).map(Vec::as_slice)
    }

    /// The body tree over all entries. Errors on an empty body.
    pub fn body_tree(&self) -> Result<MerkleTree, ChainError> {
        let leaves: Vec<TaggedLeaf> = self
            .entries
            .iter()
            .map(|entry| TaggedLeaf::bytes(MerkleTag::Transaction.bytes(), entry.clone()))
            .collect();
        Ok(MerkleTree::build(&leaves)?)
    }

    /// The transactions root committed in the owning payload.
    pub fn root(&self) -> Result<BlockHash, ChainError> {
        Ok(BlockHash(self.body_tree()?.root()?))
    }

    /// The tagged subject leaf and positioned frame for entry `index`.
    pub fn body_frame(&self, index: usize) -> Result<(TaggedLeaf, ProofFrame), ChainError> {
        let entry = self.entries.get(index).ok_or(ChainError::LeafOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        let subject = TaggedLeaf::bytes(MerkleTag::Transaction.bytes(), entry.clone());
        Ok((subject, ProofFrame::new(index, self.body_tree()?)))
    }
}

/// The ordered, encoded outputs of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOutputs {
    entries: Vec<Vec<u8>>,
}

impl BlockOutputs {
    pub fn new(entries: Vec<Vec<u8>>) -> Self {
        Self { entries }
    }

    pub fn from_outputs(outputs: &[TransactionOutput]) -> Result<Self, ChainError> {
        let entries = outputs
            .iter()
            .map(TransactionOutput::encode)
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.entries.get(index).map(Vec::as_slice)
    }

    pub fn body_tree(&self) -> Result<MerkleTree, ChainError> {
        let leaves: Vec<TaggedLeaf> = self
            .entries
            .iter()
            .map(|entry| TaggedLeaf::bytes(MerkleTag::TransactionOutput.bytes(), entry.clone()))
            .collect();
        Ok(MerkleTree::build(&leaves)?)
    }

    /// The outputs root committed in the owning payload.
    pub fn root(&self) -> Result<BlockHash, ChainError> {
        Ok(BlockHash(self.body_tree()?.root()?))
    }

    /// The tagged subject leaf and positioned frame for entry `index`.
    pub fn body_frame(&self, index: usize) -> Result<(TaggedLeaf, ProofFrame), ChainError> {
        let entry = self.entries.get(index).ok_or(ChainError::LeafOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        let subject = TaggedLeaf::bytes(MerkleTag::TransactionOutput.bytes(), entry.clone());
        Ok((subject, ProofFrame::new(index, self.body_tree()?)))
    }
}
