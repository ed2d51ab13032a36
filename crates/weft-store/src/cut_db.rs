use std::collections::BTreeMap;

use weft_chain::{BlockHash, BlockHeader, ChainGraph, ChainId};

use crate::{error::StoreError, header_db::WebHeaderDb};

/// Membership and tip queries against the current confirmed frontier.
///
/// One call observes one consistent snapshot; a caller racing an extension
/// simply ends up with a proof that fails verification against the newer
/// frontier.
#[derive(Debug, Clone)]
pub struct CutDb {
    web: WebHeaderDb,
}

impl CutDb {
    pub fn new(graph: ChainGraph, genesis: Vec<BlockHeader>) -> Result<Self, StoreError> {
        Ok(Self {
            web: WebHeaderDb::new(graph, genesis)?,
        })
    }

    /// Access to the per-chain header dbs.
    pub fn web(&self) -> &WebHeaderDb {
        &self.web
    }

    /// True iff `hash` identifies a header currently on the canonical
    /// history of `chain`.
    pub fn member(&self, chain: ChainId, hash: &BlockHash) -> Result<bool, StoreError> {
        Ok(self.web.chain(chain)?.member(hash))
    }

    /// The current best header of `chain`.
    pub fn max_header(&self, chain: ChainId) -> Result<&BlockHeader, StoreError> {
        Ok(self.web.chain(chain)?.max_header())
    }

    /// The current frontier: one tip hash per chain.
    pub fn cut(&self) -> BTreeMap<ChainId, BlockHash> {
        self.web
            .graph()
            .chains()
            .filter_map(|chain| {
                self.web
                    .chain(chain)
                    .ok()
                    .map(|db| (chain, db.max_header_hash()))
            })
            .collect()
    }

    /// Append a header to its chain after checking the braid invariants:
    /// the adjacent record covers the graph neighbours exactly, and every
    /// entry resolves to a header at the previous height. Parent linkage
    /// and height contiguity are checked by the chain db.
    pub fn extend(&mut self, header: BlockHeader) -> Result<(), StoreError> {
        let neighbours = self.web.graph().adjacent(header.chain)?.clone();

        if header.adjacents.len() != neighbours.len() {
            return Err(StoreError::InvalidHeader(format!(
                "adjacent record of the new {} block has {} entries, expected {}",
                header.chain,
                header.adjacents.len(),
                neighbours.len()
            )));
        }
        for adjacent in neighbours {
            let hash = header
                .adjacents
                .get(&adjacent)
                .ok_or(StoreError::AdjacentMissing {
                    chain: header.chain,
                    adjacent,
                })?;
            let referenced = self
                .web
                .chain(adjacent)?
                .get(hash)
                .ok_or(StoreError::HeaderNotFound(*hash, adjacent))?;
            if referenced.height + 1 != header.height {
                return Err(StoreError::InvalidHeader(format!(
                    "adjacent entry for {} points at height {}, expected {}",
                    adjacent,
                    referenced.height,
                    header.height.saturating_sub(1)
                )));
            }
        }

        self.web.chain_mut(header.chain)?.insert(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis(chain: ChainId) -> BlockHeader {
        BlockHeader::genesis(chain, BlockHash([chain.0 as u8 + 1; 32]), 0)
    }

    fn braid(graph: ChainGraph) -> CutDb {
        let genesis = graph.chains().map(genesis).collect();
        CutDb::new(graph, genesis).unwrap()
    }

    /// A header extending `chain` by one, with adjacent entries taken from
    /// the current frontier of the neighbour chains.
    fn next_header(cut: &CutDb, chain: ChainId) -> BlockHeader {
        let tip = cut.max_header(chain).unwrap();
        let mut adjacents = BTreeMap::new();
        for &neighbour in cut.web().graph().adjacent(chain).unwrap() {
            let db = cut.web().chain(neighbour).unwrap();
            adjacents.insert(neighbour, db.hash_at_height(tip.height).unwrap());
        }
        BlockHeader {
            chain,
            height: tip.height + 1,
            created: tip.created + 30,
            payload_hash: BlockHash([0xEE; 32]),
            parent: cut.web().chain(chain).unwrap().max_header_hash(),
            adjacents,
        }
    }

    /// Extend every chain by one height, snapshotting the frontier first so
    /// each new header references the previous round.
    fn extend_round(cut: &mut CutDb) {
        let chains: Vec<ChainId> = cut.web().graph().chains().collect();
        let headers: Vec<BlockHeader> = chains.iter().map(|&c| next_header(cut, c)).collect();
        for header in headers {
            cut.extend(header).unwrap();
        }
    }

    #[test]
    fn member_tracks_extended_headers() {
        let mut cut = braid(ChainGraph::complete(3));
        let genesis_hash = cut.web().chain(ChainId(0)).unwrap().max_header_hash();

        extend_round(&mut cut);
        extend_round(&mut cut);

        let tip_hash = cut.web().chain(ChainId(0)).unwrap().max_header_hash();
        assert!(cut.member(ChainId(0), &genesis_hash).unwrap());
        assert!(cut.member(ChainId(0), &tip_hash).unwrap());
        assert!(!cut.member(ChainId(1), &tip_hash).unwrap());
        assert_eq!(cut.max_header(ChainId(0)).unwrap().height, 2);
    }

    #[test]
    fn cut_snapshots_every_tip() {
        let mut cut = braid(ChainGraph::complete(3));
        extend_round(&mut cut);

        let frontier = cut.cut();
        assert_eq!(frontier.len(), 3);
        for (chain, hash) in frontier {
            assert_eq!(cut.web().chain(chain).unwrap().max_header_hash(), hash);
        }
    }

    #[test]
    fn extend_rejects_wrong_parent() {
        let mut cut = braid(ChainGraph::complete(2));
        let mut header = next_header(&cut, ChainId(0));
        header.parent = BlockHash([0xBA; 32]);
        assert!(cut.extend(header).is_err());
    }

    #[test]
    fn extend_rejects_height_gap() {
        let mut cut = braid(ChainGraph::complete(2));
        let mut header = next_header(&cut, ChainId(0));
        header.height += 1;
        assert!(cut.extend(header).is_err());
    }

    #[test]
    fn extend_rejects_incomplete_adjacent_record() {
        let mut cut = braid(ChainGraph::complete(3));
        let mut header = next_header(&cut, ChainId(0));
        header.adjacents.remove(&ChainId(2));
        assert!(cut.extend(header).is_err());
    }

    #[test]
    fn extend_rejects_stale_adjacent_entry() {
        let mut cut = braid(ChainGraph::complete(2));
        extend_round(&mut cut);

        // New block at height 2 whose adjacent entry still points at the
        // neighbour's genesis.
        let mut header = next_header(&cut, ChainId(0));
        let stale = cut.web().chain(ChainId(1)).unwrap().hash_at_height(0).unwrap();
        header.adjacents.insert(ChainId(1), stale);
        assert!(cut.extend(header).is_err());
    }

    #[test]
    fn adjacent_parent_resolves_previous_height() {
        let mut cut = braid(ChainGraph::complete(3));
        extend_round(&mut cut);
        extend_round(&mut cut);

        let tip = cut.max_header(ChainId(0)).unwrap();
        let adjacent = cut
            .web()
            .lookup_adjacent_parent(tip, ChainId(2))
            .unwrap();
        assert_eq!(adjacent.chain, ChainId(2));
        assert_eq!(adjacent.height, tip.height - 1);
    }

    #[test]
    fn parent_walk_reaches_genesis() {
        let mut cut = braid(ChainGraph::complete(2));
        extend_round(&mut cut);
        extend_round(&mut cut);

        let mut header = cut.max_header(ChainId(1)).unwrap();
        while header.height > 0 {
            header = cut.web().lookup_parent(header).unwrap();
        }
        assert_eq!(header.parent, BlockHash::ZERO);
    }
}
