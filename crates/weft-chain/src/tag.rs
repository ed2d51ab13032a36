use crate::chain_id::ChainId;

/// The Merkle universe: domain-separation tags naming the semantic field a
/// hashed leaf occupies.
///
/// A proof frame can only splice through a child because the child's leaf
/// hash commits to one of these tags; two fields with the same bytes still
/// hash differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleTag {
    Chain,
    Height,
    Created,
    BlockPayloadHash,
    Parent,
    AdjacentParent(ChainId),
    TransactionsRoot,
    OutputsRoot,
    Transaction,
    TransactionOutput,
}

impl MerkleTag {
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            MerkleTag::Chain => b"chain".to_vec(),
            MerkleTag::Height => b"height".to_vec(),
            MerkleTag::Created => b"created".to_vec(),
            MerkleTag::BlockPayloadHash => b"payload-hash".to_vec(),
            MerkleTag::Parent => b"parent".to_vec(),
            MerkleTag::AdjacentParent(chain) => {
                let mut tag = b"adjacent/".to_vec();
                tag.extend_from_slice(&chain.encode());
                tag
            }
            MerkleTag::TransactionsRoot => b"transactions-root".to_vec(),
            MerkleTag::OutputsRoot => b"outputs-root".to_vec(),
            MerkleTag::Transaction => b"transaction".to_vec(),
            MerkleTag::TransactionOutput => b"transaction-output".to_vec(),
        }
    }
}
