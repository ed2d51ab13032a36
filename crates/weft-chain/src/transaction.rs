use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// A single value transfer recorded on one chain of the braid.
///
/// The canonical bincode encoding of this record is the leaf value in the
/// block's transaction body tree, and is what an SPV proof ultimately
/// delivers back to the verifying party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Per-sender sequence number.
    pub nonce: u64,

    pub sender: String,

    pub receiver: String,

    pub amount: u64,

    /// Unix timestamp (seconds) when this transaction was created.
    pub created: i64,
}

impl Transaction {
    pub fn new(
        nonce: u64,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            nonce,
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            created: Utc::now().timestamp(),
        }
    }

    /// Canonical byte encoding.
    pub fn encode(&self) -> Result<Vec<u8>, ChainError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ChainError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// One output produced by applying a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub recipient: String,

    pub amount: u64,
}

impl TransactionOutput {
    pub fn new(recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            recipient: recipient.into(),
            amount,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, ChainError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ChainError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
