use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graph::GraphSource;

/// Adjacent ordinals per node, captured once so BFS never goes back to the host graph.
///
/// Lists are sorted ascending and free of duplicates and self-loops. Adjacency is symmetric even
/// if the source only reports one direction of an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborhoodIndex {
    // CSR layout: neighbors of `v` are `targets[offsets[v]..offsets[v + 1]]`.
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl NeighborhoodIndex {
    pub fn build<G: GraphSource + ?Sized>(graph: &G) -> Result<Self> {
        let n = graph.node_count();

        let mut ordinal_of: FxHashMap<&str, usize> = FxHashMap::default();
        ordinal_of.reserve(n);
        for v in 0..n {
            let key = graph.node_key(v);
            if ordinal_of.insert(key, v).is_some() {
                return Err(Error::invalid(format!("duplicate node key: {key}")));
            }
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        if let Some(edges) = graph.edges() {
            for (a, b) in edges {
                let (Some(&u), Some(&v)) = (ordinal_of.get(a), ordinal_of.get(b)) else {
                    return Err(Error::invalid(format!(
                        "edge {a} -- {b} has an endpoint that is not in the node set"
                    )));
                };
                link(&mut adjacency, u, v);
            }
        } else {
            for v in 0..n {
                for key in graph.neighbors(v) {
                    let Some(&u) = ordinal_of.get(key) else {
                        return Err(Error::invalid(format!(
                            "node {} lists neighbor {key} which is not in the node set",
                            graph.node_key(v)
                        )));
                    };
                    link(&mut adjacency, u, v);
                }
            }
        }

        Ok(Self::from_adjacency(adjacency))
    }

    /// Builds directly from ordinal pairs; endpoints outside `[0, node_count)` are rejected.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for &(a, b) in edges {
            if a >= node_count || b >= node_count {
                return Err(Error::invalid(format!(
                    "edge ({a}, {b}) references an ordinal outside 0..{node_count}"
                )));
            }
            link(&mut adjacency, a, b);
        }

        Ok(Self::from_adjacency(adjacency))
    }

    fn from_adjacency(mut adjacency: Vec<Vec<usize>>) -> Self {
        let mut offsets = Vec::with_capacity(adjacency.len() + 1);
        let mut targets = Vec::new();
        offsets.push(0);
        for neigh in &mut adjacency {
            neigh.sort_unstable();
            neigh.dedup();
            targets.extend_from_slice(neigh);
            offsets.push(targets.len());
        }
        Self { offsets, targets }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }
}

fn link(adjacency: &mut [Vec<usize>], a: usize, b: usize) {
    if a != b {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }
}
