use std::collections::VecDeque;

use super::NeighborhoodIndex;
use crate::error::{Error, Result};

/// Distance recorded for nodes that BFS cannot reach from the source.
///
/// Kept out of band of every real distance, whatever the edge length.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Scaled hop distances from one source to every node.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRow {
    pub source: usize,
    pub distances: Vec<f64>,
}

impl DistanceRow {
    pub fn get(&self, v: usize) -> f64 {
        self.distances[v]
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn is_reachable(&self, v: usize) -> bool {
        self.distances[v].is_finite()
    }

    pub fn has_unreachable(&self) -> bool {
        self.distances.iter().any(|&d| !d.is_finite())
    }

    /// Largest distance to a reachable node (the source's eccentricity, scaled).
    pub fn max_finite(&self) -> f64 {
        self.distances
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Single-source BFS over a [`NeighborhoodIndex`].
#[derive(Debug, Clone, Copy)]
pub struct DistanceOracle<'a> {
    index: &'a NeighborhoodIndex,
    edge_length: f64,
}

impl<'a> DistanceOracle<'a> {
    pub fn new(index: &'a NeighborhoodIndex, edge_length: f64) -> Self {
        Self { index, edge_length }
    }

    pub fn node_count(&self) -> usize {
        self.index.node_count()
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    pub fn distances_from(&self, source: usize) -> Result<DistanceRow> {
        let n = self.index.node_count();
        if source >= n {
            return Err(Error::invalid(format!(
                "BFS source {source} is outside 0..{n}"
            )));
        }

        let mut hops: Vec<i32> = vec![-1; n];
        let mut q: VecDeque<usize> = VecDeque::new();
        hops[source] = 0;
        q.push_back(source);

        while let Some(v) = q.pop_front() {
            for &u in self.index.neighbors(v) {
                if hops[u] == -1 {
                    hops[u] = hops[v].saturating_add(1);
                    q.push_back(u);
                }
            }
        }

        let distances = hops
            .into_iter()
            .map(|h| {
                if h < 0 {
                    UNREACHABLE
                } else {
                    (h as f64) * self.edge_length
                }
            })
            .collect();

        Ok(DistanceRow { source, distances })
    }
}
