use super::{DistanceOracle, DistanceRow};
use crate::cancel::CancelToken;
use crate::error::Result;

/// Landmark ordinals in selection order. Never contains duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotSet(Vec<usize>);

impl PivotSet {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, v: usize) -> bool {
        self.0.contains(&v)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

/// Pivots together with the BFS row computed for each of them (same order).
#[derive(Debug, Clone)]
pub struct SampledPivots {
    pub pivots: PivotSet,
    pub rows: Vec<DistanceRow>,
}

/// Greedy farthest-point (k-center) landmark selection.
///
/// After each pivot's BFS, every node keeps its distance to the nearest pivot chosen so far; the
/// next pivot is the node where that distance is largest (lowest ordinal on ties). Chosen nodes sit
/// at distance 0 from the set, so they are never picked again.
#[derive(Debug, Clone, Copy)]
pub struct PivotSampler<'a> {
    oracle: DistanceOracle<'a>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> PivotSampler<'a> {
    pub fn new(oracle: DistanceOracle<'a>) -> Self {
        Self {
            oracle,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: Option<&'a CancelToken>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Selects `min(count, n - 1)` pivots starting from `first`.
    pub fn sample(&self, count: usize, first: usize) -> Result<SampledPivots> {
        let n = self.oracle.node_count();
        let count = count.min(n.saturating_sub(1));

        let mut pivots: Vec<usize> = Vec::with_capacity(count);
        let mut rows: Vec<DistanceRow> = Vec::with_capacity(count);
        let mut min_dist: Vec<f64> = vec![f64::INFINITY; n];

        let mut next = first;
        while pivots.len() < count {
            if let Some(token) = self.cancel {
                token.check()?;
            }

            let row = self.oracle.distances_from(next)?;
            for (m, &d) in min_dist.iter_mut().zip(&row.distances) {
                if d < *m {
                    *m = d;
                }
            }
            pivots.push(next);
            rows.push(row);

            if pivots.len() < count {
                next = farthest(&min_dist);
            }
        }

        Ok(SampledPivots {
            pivots: PivotSet(pivots),
            rows,
        })
    }
}

fn farthest(min_dist: &[f64]) -> usize {
    let mut best = 0usize;
    let mut best_dist = f64::NEG_INFINITY;
    for (i, &d) in min_dist.iter().enumerate() {
        if d > best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}
