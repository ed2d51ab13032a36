use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::{chain_id::ChainId, error::ChainError};

/// The fixed undirected adjacency between the chains of the braid.
///
/// Immutable once constructed. Every block at height `h` on chain `C`
/// references one block at `h - 1` on each chain adjacent to `C`, so this
/// graph bounds which header-to-header links can exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainGraph {
    adjacency: BTreeMap<ChainId, BTreeSet<ChainId>>,
}

impl ChainGraph {
    /// Build a graph from undirected edges. Vertices are implied by the
    /// edges; self edges are rejected.
    pub fn from_edges(edges: impl IntoIterator<Item = (ChainId, ChainId)>) -> Result<Self, ChainError> {
        let mut adjacency: BTreeMap<ChainId, BTreeSet<ChainId>> = BTreeMap::new();
        for (a, b) in edges {
            if a == b {
                return Err(ChainError::SelfEdge(a));
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        Ok(Self { adjacency })
    }

    /// The complete graph over chain ids `0..n`.
    pub fn complete(n: u32) -> Self {
        let mut adjacency = BTreeMap::new();
        for i in 0..n {
            let neighbours = (0..n).filter(|j| *j != i).map(ChainId).collect();
            adjacency.insert(ChainId(i), neighbours);
        }
        Self { adjacency }
    }

    pub fn chain_count(&self) -> usize {
        self.adjacency.len()
    }

    /// All chains, in canonical order.
    pub fn chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn contains(&self, chain: ChainId) -> bool {
        self.adjacency.contains_key(&chain)
    }

    /// The neighbours of `chain`, in canonical order.
    pub fn adjacent(&self, chain: ChainId) -> Result<&BTreeSet<ChainId>, ChainError> {
        self.adjacency
            .get(&chain)
            .ok_or(ChainError::UnknownChain(chain))
    }

    /// Breadth-first shortest path: the sequence of chains to traverse from
    /// `from` to `to`, destination included, empty when `from == to`.
    ///
    /// Neighbours are expanded in chain-id order, so equal-length routes
    /// resolve to the same path on every run.
    pub fn shortest_path(&self, from: ChainId, to: ChainId) -> Result<Vec<ChainId>, ChainError> {
        self.adjacent(from)?;
        if !self.contains(to) {
            return Err(ChainError::UnknownChain(to));
        }
        if from == to {
            return Ok(Vec::new());
        }

        let mut previous: BTreeMap<ChainId, ChainId> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            for &next in self.adjacent(current)? {
                if next == from || previous.contains_key(&next) {
                    continue;
                }
                previous.insert(next, current);
                if next == to {
                    let mut path = Vec::new();
                    let mut step = to;
                    while step != from {
                        path.push(step);
                        step = previous[&step];
                    }
                    path.reverse();
                    return Ok(path);
                }
                queue.push_back(next);
            }
        }

        Err(ChainError::Unreachable { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: u32) -> ChainId {
        ChainId(id)
    }

    #[test]
    fn complete_graph_connects_all_pairs() {
        let graph = ChainGraph::complete(3);
        assert_eq!(graph.chain_count(), 3);
        for chain in graph.chains() {
            assert_eq!(graph.adjacent(chain).unwrap().len(), 2);
        }
    }

    #[test]
    fn path_to_self_is_empty() {
        let graph = ChainGraph::complete(3);
        assert!(graph.shortest_path(c(1), c(1)).unwrap().is_empty());
    }

    #[test]
    fn adjacent_chains_are_one_hop() {
        let graph = ChainGraph::complete(3);
        assert_eq!(graph.shortest_path(c(0), c(2)).unwrap(), vec![c(2)]);
    }

    #[test]
    fn line_graph_routes_through_the_middle() {
        let graph = ChainGraph::from_edges([(c(0), c(1)), (c(1), c(2))]).unwrap();
        assert_eq!(graph.shortest_path(c(0), c(2)).unwrap(), vec![c(1), c(2)]);
    }

    #[test]
    fn equal_length_routes_tie_break_by_chain_id() {
        // Two routes 0 -> 3: through 1 and through 2. The lower id wins.
        let graph =
            ChainGraph::from_edges([(c(0), c(1)), (c(0), c(2)), (c(1), c(3)), (c(2), c(3))])
                .unwrap();
        assert_eq!(graph.shortest_path(c(0), c(3)).unwrap(), vec![c(1), c(3)]);
    }

    #[test]
    fn disconnected_chains_are_unreachable() {
        let graph = ChainGraph::from_edges([(c(0), c(1)), (c(2), c(3))]).unwrap();
        assert!(matches!(
            graph.shortest_path(c(0), c(3)),
            Err(ChainError::Unreachable { .. })
        ));
    }

    #[test]
    fn self_edges_rejected() {
        assert!(ChainGraph::from_edges([(c(0), c(0))]).is_err());
    }

    #[test]
    fn unknown_chain_rejected() {
        let graph = ChainGraph::complete(2);
        assert!(graph.shortest_path(c(0), c(7)).is_err());
        assert!(graph.adjacent(c(7)).is_err());
    }
}
