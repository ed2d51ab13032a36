use tracing::{debug, trace};
use weft_chain::{ChainId, HeaderField, PayloadField};
use weft_merkle::MerkleProof;
use weft_store::{CutDb, PayloadStore};

use crate::{
    error::SpvError,
    proof::{TransactionOutputProof, TransactionProof},
};

/// Which payload sub-tree a proof opens.
#[derive(Debug, Clone, Copy)]
enum ProofKind {
    Transaction,
    Output,
}

/// Build an SPV proof that transaction `index` of the `source` block at
/// `src_height` is on the canonical history witnessed by the current head
/// of `target`.
pub fn create_transaction_proof(
    cut: &CutDb,
    payloads: &PayloadStore,
    target: ChainId,
    source: ChainId,
    src_height: u64,
    index: usize,
) -> Result<TransactionProof, SpvError> {
    let proof = build_proof(
        cut,
        payloads,
        target,
        source,
        src_height,
        index,
        ProofKind::Transaction,
    )?;
    Ok(TransactionProof {
        chain: target,
        proof,
    })
}

/// As [`create_transaction_proof`], for output `index` of the source block.
pub fn create_transaction_output_proof(
    cut: &CutDb,
    payloads: &PayloadStore,
    target: ChainId,
    source: ChainId,
    src_height: u64,
    index: usize,
) -> Result<TransactionOutputProof, SpvError> {
    let proof = build_proof(
        cut,
        payloads,
        target,
        source,
        src_height,
        index,
        ProofKind::Output,
    )?;
    Ok(TransactionOutputProof {
        chain: target,
        proof,
    })
}

/// Single-pass proof construction: graph walk, store fetches, frame
/// assembly. The two proof kinds differ only in their first two frames.
fn build_proof(
    cut: &CutDb,
    payloads: &PayloadStore,
    target: ChainId,
    source: ChainId,
    src_height: u64,
    index: usize,
    kind: ProofKind,
) -> Result<MerkleProof, SpvError> {
    let web = cut.web();
    let path = web.graph().shortest_path(target, source)?;
    let trg_head = cut.max_header(target)?;
    debug!(
        target_chain = %target,
        source_chain = %source,
        src_height,
        index,
        hops = path.len(),
        head_height = trg_head.height,
        "creating inclusion proof"
    );

    // Each cross-chain edge consumes one ancestor step below the head.
    if trg_head.height + 1 < path.len() as u64 {
        return Err(SpvError::TargetNotReachable("chain too young"));
    }

    // Walk adjacent-parent edges from the target head to the source chain,
    // collecting the splice frame of every visited header.
    let mut cross_frames = Vec::with_capacity(path.len());
    let mut cursor = trg_head;
    for &hop in &path {
        cross_frames.push(cursor.frame(HeaderField::Adjacent(hop))?);
        cursor = web.lookup_adjacent_parent(cursor, hop)?;
        trace!(%hop, height = cursor.height, "crossed to adjacent parent");
    }

    let src_head = cursor;
    if src_head.height < src_height {
        return Err(SpvError::TargetNotReachable(
            "source transaction above reachable source head",
        ));
    }

    // Walk parent edges down to the requested height. The headers above
    // the source block each contribute their parent splice frame.
    let mut above = Vec::new();
    let mut cursor = src_head;
    while cursor.height > src_height {
        above.push(cursor);
        cursor = web.lookup_parent(cursor)?;
    }
    if cursor.height != src_height {
        return Err(SpvError::TargetNotReachable(
            "no source block at the requested height",
        ));
    }
    let src_header = cursor;
    above.reverse();

    let payload = payloads
        .payload(&src_header.payload_hash)
        .ok_or(SpvError::InconsistentPayloadData(
            "missing payload for source block",
        ))?;
    if payload.hash()? != src_header.payload_hash {
        return Err(SpvError::InconsistentPayloadData(
            "stored payload does not match the header's payload hash",
        ));
    }

    let (subject, body_frame, payload_frame) = match kind {
        ProofKind::Transaction => {
            let body = payloads.transactions(&payload.transactions_root).ok_or(
                SpvError::InconsistentPayloadData("missing transaction list for source block"),
            )?;
            let (subject, frame) = body.body_frame(index)?;
            (subject, frame, payload.frame(PayloadField::TransactionsRoot)?)
        }
        ProofKind::Output => {
            let body = payloads.outputs(&payload.outputs_root).ok_or(
                SpvError::InconsistentPayloadData("missing output list for source block"),
            )?;
            let (subject, frame) = body.body_frame(index)?;
            (subject, frame, payload.frame(PayloadField::OutputsRoot)?)
        }
    };

    // Frame order is fold order: body, payload, the source header's payload
    // splice, the parent spine bottom-up, then the cross-chain frames
    // reversed so the fold terminates at the target head.
    let mut frames = vec![
        body_frame,
        payload_frame,
        src_header.frame(HeaderField::PayloadHash)?,
    ];
    for header in &above {
        frames.push(header.frame(HeaderField::Parent)?);
    }
    frames.extend(cross_frames.into_iter().rev());

    Ok(MerkleProof::new(subject, frames)?)
}
