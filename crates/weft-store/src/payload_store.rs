use std::collections::HashMap;

use weft_chain::{BlockHash, BlockOutputs, BlockPayload, BlockTransactions};

/// Keyed content stores for block bodies: payloads by payload hash,
/// transaction lists by transactions root, output lists by outputs root.
///
/// Keys are supplied by the caller: the payload hash named by a header,
/// the body roots named by a payload. The store never recomputes them,
/// which is why the proof builder re-validates the payload hash against
/// the header it came from.
#[derive(Debug, Clone, Default)]
pub struct PayloadStore {
    payloads: HashMap<BlockHash, BlockPayload>,
    transactions: HashMap<BlockHash, BlockTransactions>,
    outputs: HashMap<BlockHash, BlockOutputs>,
}

impl PayloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_payload(&mut self, hash: BlockHash, payload: BlockPayload) {
        self.payloads.insert(hash, payload);
    }

    pub fn insert_transactions(&mut self, root: BlockHash, transactions: BlockTransactions) {
        self.transactions.insert(root, transactions);
    }

    pub fn insert_outputs(&mut self, root: BlockHash, outputs: BlockOutputs) {
        self.outputs.insert(root, outputs);
    }

    pub fn payload(&self, hash: &BlockHash) -> Option<&BlockPayload> {
        self.payloads.get(hash)
    }

    pub fn transactions(&self, root: &BlockHash) -> Option<&BlockTransactions> {
        self.transactions.get(root)
    }

    pub fn outputs(&self, root: &BlockHash) -> Option<&BlockOutputs> {
        self.outputs.get(root)
    }
}
