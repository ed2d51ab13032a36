use tracing::debug;
use weft_chain::{BlockHash, ChainId, Transaction, TransactionOutput};
use weft_merkle::{LeafData, MerkleProof};
use weft_store::{CutDb, StoreError};

use crate::{
    error::SpvError,
    proof::{TransactionOutputProof, TransactionProof},
};

/// Fold the proof into the block hash it claims the target chain holds.
pub fn run_transaction_proof(proof: &TransactionProof) -> Result<BlockHash, SpvError> {
    fold(&proof.proof)
}

/// Fold the output proof into its claimed block hash.
pub fn run_transaction_output_proof(proof: &TransactionOutputProof) -> Result<BlockHash, SpvError> {
    fold(&proof.proof)
}

/// Verify `proof` against the current frontier and return the transaction
/// it is about.
pub fn verify_transaction_proof(
    cut: &CutDb,
    proof: &TransactionProof,
) -> Result<Transaction, SpvError> {
    let root = run_transaction_proof(proof)?;
    ensure_member(cut, proof.chain, &root)?;

    let bytes = subject_bytes(&proof.proof)?;
    let transaction = Transaction::decode(bytes)
        .map_err(|_| SpvError::VerificationFailed("subject does not decode as a transaction"))?;
    debug!(chain = %proof.chain, root = %root, "verified transaction proof");
    Ok(transaction)
}

/// Verify `proof` against the current frontier and return the output it is
/// about.
pub fn verify_transaction_output_proof(
    cut: &CutDb,
    proof: &TransactionOutputProof,
) -> Result<TransactionOutput, SpvError> {
    let root = run_transaction_output_proof(proof)?;
    ensure_member(cut, proof.chain, &root)?;

    let bytes = subject_bytes(&proof.proof)?;
    let output = TransactionOutput::decode(bytes)
        .map_err(|_| SpvError::VerificationFailed("subject does not decode as an output"))?;
    debug!(chain = %proof.chain, root = %root, "verified transaction output proof");
    Ok(output)
}

fn fold(proof: &MerkleProof) -> Result<BlockHash, SpvError> {
    proof
        .run()
        .map(BlockHash)
        .map_err(|_| SpvError::VerificationFailed("proof cannot be folded"))
}

fn ensure_member(cut: &CutDb, chain: ChainId, root: &BlockHash) -> Result<(), SpvError> {
    let on_chain = match cut.member(chain, root) {
        Ok(found) => found,
        // A forged proof naming an unknown chain is a verification failure,
        // not store corruption.
        Err(StoreError::UnknownChain(_)) => false,
        Err(err) => return Err(err.into()),
    };
    if !on_chain {
        return Err(SpvError::VerificationFailed(
            "target header is not in the chain",
        ));
    }
    Ok(())
}

fn subject_bytes(proof: &MerkleProof) -> Result<&[u8], SpvError> {
    match &proof.subject.data {
        LeafData::Bytes(bytes) => Ok(bytes),
        LeafData::SubRoot(_) => Err(SpvError::VerificationFailed(
            "proof subject is not a body leaf",
        )),
    }
}
