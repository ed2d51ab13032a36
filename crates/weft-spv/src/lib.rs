pub mod create;
pub mod error;
pub mod proof;
pub mod verify;

pub use create::{create_transaction_output_proof, create_transaction_proof};
pub use error::SpvError;
pub use proof::{TransactionOutputProof, TransactionProof};
pub use verify::{
    run_transaction_output_proof, run_transaction_proof, verify_transaction_output_proof,
    verify_transaction_proof,
};
