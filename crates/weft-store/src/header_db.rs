use std::collections::{BTreeMap, HashMap};

use weft_chain::{BlockHash, BlockHeader, ChainGraph, ChainId};

use crate::error::StoreError;

/// The canonical header sequence of one chain.
///
/// Invariants maintained by this type:
/// - Always contains at least the genesis header.
/// - Every header's `parent` matches the hash of the header below it.
/// - Heights are contiguous starting from 0.
#[derive(Debug, Clone)]
pub struct ChainHeaderDb {
    chain: ChainId,
    headers: Vec<BlockHeader>,
    /// Block hash of each entry in `headers`, computed once on insert.
    hashes: Vec<BlockHash>,
    by_hash: HashMap<BlockHash, usize>,
}

impl ChainHeaderDb {
    /// Initialise a chain db from its genesis header.
    pub fn new(genesis: BlockHeader) -> Result<Self, StoreError> {
        if genesis.height != 0 || genesis.parent != BlockHash::ZERO {
            return Err(StoreError::InvalidHeader(format!(
                "genesis for {} must sit at height 0 with a zero parent",
                genesis.chain
            )));
        }
        let hash = genesis.block_hash()?;
        Ok(Self {
            chain: genesis.chain,
            headers: vec![genesis],
            hashes: vec![hash],
            by_hash: HashMap::from([(hash, 0)]),
        })
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// Height of the current tip.
    pub fn height(&self) -> u64 {
        (self.headers.len() - 1) as u64
    }

    /// The current best header of this chain.
    pub fn max_header(&self) -> &BlockHeader {
        // Safety: always at least the genesis header.
        self.headers.last().unwrap()
    }

    pub fn max_header_hash(&self) -> BlockHash {
        *self.hashes.last().unwrap()
    }

    pub fn get(&self, hash: &BlockHash) -> Option<&BlockHeader> {
        self.by_hash.get(hash).map(|index| &self.headers[*index])
    }

    pub fn at_height(&self, height: u64) -> Option<&BlockHeader> {
        self.headers.get(height as usize)
    }

    pub fn hash_at_height(&self, height: u64) -> Option<BlockHash> {
        self.hashes.get(height as usize).copied()
    }

    /// True iff `hash` names a header of this chain.
    pub fn member(&self, hash: &BlockHash) -> bool {
        self.by_hash.contains_key(hash)
    }

    /// Append `header`, enforcing chain id, contiguous height and parent
    /// linkage. Adjacency against the rest of the braid is checked by
    /// [`crate::CutDb::extend`].
    pub fn insert(&mut self, header: BlockHeader) -> Result<(), StoreError> {
        if header.chain != self.chain {
            return Err(StoreError::InvalidHeader(format!(
                "header for {} inserted into the {} db",
                header.chain, self.chain
            )));
        }
        if header.height != self.height() + 1 {
            return Err(StoreError::InvalidHeader(format!(
                "height {} does not extend tip height {}",
                header.height,
                self.height()
            )));
        }
        if header.parent != self.max_header_hash() {
            return Err(StoreError::InvalidHeader(format!(
                "parent {} is not the tip of {}",
                header.parent, self.chain
            )));
        }

        let hash = header.block_hash()?;
        self.by_hash.insert(hash, self.headers.len());
        self.hashes.push(hash);
        self.headers.push(header);
        Ok(())
    }
}

/// The braided header index: one [`ChainHeaderDb`] per chain of the graph.
#[derive(Debug, Clone)]
pub struct WebHeaderDb {
    graph: ChainGraph,
    chains: BTreeMap<ChainId, ChainHeaderDb>,
}

impl WebHeaderDb {
    /// Initialise the braid from one genesis header per graph chain.
    pub fn new(graph: ChainGraph, genesis: Vec<BlockHeader>) -> Result<Self, StoreError> {
        let mut chains = BTreeMap::new();
        for header in genesis {
            let chain = header.chain;
            if !graph.contains(chain) {
                return Err(StoreError::UnknownChain(chain));
            }
            if chains.insert(chain, ChainHeaderDb::new(header)?).is_some() {
                return Err(StoreError::InvalidHeader(format!(
                    "duplicate genesis for {chain}"
                )));
            }
        }
        for chain in graph.chains() {
            if !chains.contains_key(&chain) {
                return Err(StoreError::InvalidHeader(format!(
                    "missing genesis for {chain}"
                )));
            }
        }
        Ok(Self { graph, chains })
    }

    pub fn graph(&self) -> &ChainGraph {
        &self.graph
    }

    pub fn chain(&self, chain: ChainId) -> Result<&ChainHeaderDb, StoreError> {
        self.chains.get(&chain).ok_or(StoreError::UnknownChain(chain))
    }

    pub(crate) fn chain_mut(&mut self, chain: ChainId) -> Result<&mut ChainHeaderDb, StoreError> {
        self.chains
            .get_mut(&chain)
            .ok_or(StoreError::UnknownChain(chain))
    }

    /// The parent header of `header` on the same chain.
    ///
    /// Failing at genesis, or on a parent hash the chain db does not hold,
    /// is an internal-invariant error: the data model guarantees both.
    pub fn lookup_parent(&self, header: &BlockHeader) -> Result<&BlockHeader, StoreError> {
        if header.height == 0 {
            return Err(StoreError::GenesisHasNoParent(header.chain));
        }
        self.chain(header.chain)?
            .get(&header.parent)
            .ok_or(StoreError::HeaderNotFound(header.parent, header.chain))
    }

    /// The header on `chain` that `header`'s adjacent record points at.
    pub fn lookup_adjacent_parent(
        &self,
        header: &BlockHeader,
        chain: ChainId,
    ) -> Result<&BlockHeader, StoreError> {
        let hash = header
            .adjacents
            .get(&chain)
            .ok_or(StoreError::AdjacentMissing {
                chain: header.chain,
                adjacent: chain,
            })?;
        self.chain(chain)?
            .get(hash)
            .ok_or(StoreError::HeaderNotFound(*hash, chain))
    }
}
