pub mod chain_id;
pub mod error;
pub mod graph;
pub mod header;
pub mod payload;
pub mod tag;
pub mod transaction;

pub use chain_id::ChainId;
pub use error::ChainError;
pub use graph::ChainGraph;
pub use header::{BlockHash, BlockHeader, HeaderField};
pub use payload::{BlockOutputs, BlockPayload, BlockTransactions, PayloadField};
pub use tag::MerkleTag;
pub use transaction::{Transaction, TransactionOutput};
