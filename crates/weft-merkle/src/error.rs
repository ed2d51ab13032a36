use thiserror::Error;

#[derive(Debug, Error)]
pub enum MerkleError {
    #[error("tree has no leaves")]
    Empty,

    #[error("proof has no frames")]
    NoFrames,

    #[error("position {position} out of range for a tree of {leaves} leaves")]
    PositionOutOfRange { position: usize, leaves: usize },
}
