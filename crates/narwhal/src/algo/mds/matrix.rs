use nalgebra::DMatrix;

use super::{DistanceOracle, DistanceRow};
use crate::algo::MatrixMode;
use crate::cancel::CancelToken;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixShape {
    /// One row per node, `n×n`, symmetric for undirected graphs.
    Full,
    /// One row per pivot, `p×n`.
    Landmark,
}

impl MatrixShape {
    pub fn resolve(mode: MatrixMode, node_count: usize, pivot_cap: usize) -> Self {
        match mode {
            MatrixMode::Full => Self::Full,
            MatrixMode::Landmark => Self::Landmark,
            MatrixMode::Auto if node_count < pivot_cap => Self::Full,
            MatrixMode::Auto => Self::Landmark,
        }
    }
}

/// Scaled BFS distances, one row per source ordinal and one column per node.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    shape: MatrixShape,
    sources: Vec<usize>,
    data: DMatrix<f64>,
    clamped: bool,
}

impl DistanceMatrix {
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Row `i` holds the distances from `sources()[i]`.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn get(&self, row: usize, node: usize) -> f64 {
        self.data[(row, node)]
    }

    pub fn node_count(&self) -> usize {
        self.data.ncols()
    }

    pub fn row_count(&self) -> usize {
        self.data.nrows()
    }

    /// Whether any unreachable entry was replaced by a finite stand-in.
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    /// Assembles rows into a matrix, replacing [`UNREACHABLE`](super::UNREACHABLE) with one hop
    /// past the largest finite distance so disconnected parts stay apart and `D·Dᵗ` stays finite.
    pub fn from_rows(shape: MatrixShape, rows: &[DistanceRow], edge_length: f64) -> Result<Self> {
        let n = rows.first().map_or(0, DistanceRow::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(Error::invalid(format!(
                "distance row for source {} has {} entries, expected {n}",
                bad.source,
                bad.len()
            )));
        }

        let max_finite = rows.iter().map(DistanceRow::max_finite).fold(0.0, f64::max);
        let stand_in = max_finite + edge_length;
        let clamped = rows.iter().any(DistanceRow::has_unreachable);

        let data = DMatrix::<f64>::from_fn(rows.len(), n, |i, j| {
            let d = rows[i].distances[j];
            if d.is_finite() { d } else { stand_in }
        });

        Ok(Self {
            shape,
            sources: rows.iter().map(|r| r.source).collect(),
            data,
            clamped,
        })
    }
}

/// Runs the BFS sources a [`MatrixShape`] needs and assembles the result.
#[derive(Debug, Clone, Copy)]
pub struct DistanceMatrixBuilder<'a> {
    oracle: DistanceOracle<'a>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> DistanceMatrixBuilder<'a> {
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

    pub fn build(
        &self,
        shape: MatrixShape,
        pivot_rows: Vec<DistanceRow>,
    ) -> Result<DistanceMatrix> {
        match shape {
            MatrixShape::Full => self.full(pivot_rows),
            MatrixShape::Landmark => self.landmark(pivot_rows),
        }
    }

    /// BFS from every node. Rows already computed (e.g. for pivots) are reused.
    pub fn full(&self, known: Vec<DistanceRow>) -> Result<DistanceMatrix> {
        let n = self.oracle.node_count();
        let mut slots: Vec<Option<DistanceRow>> = vec![None; n];
        for row in known {
            if row.source < n {
                let source = row.source;
                slots[source] = Some(row);
            }
        }

        let mut rows: Vec<DistanceRow> = Vec::with_capacity(n);
        for (source, slot) in slots.into_iter().enumerate() {
            let row = match slot {
                Some(row) => row,
                None => {
                    if let Some(token) = self.cancel {
                        token.check()?;
                    }
                    self.oracle.distances_from(source)?
                }
            };
            rows.push(row);
        }

        DistanceMatrix::from_rows(MatrixShape::Full, &rows, self.oracle.edge_length())
    }

    /// Uses the pivot rows as-is; no further BFS.
    pub fn landmark(&self, pivot_rows: Vec<DistanceRow>) -> Result<DistanceMatrix> {
        DistanceMatrix::from_rows(
            MatrixShape::Landmark,
            &pivot_rows,
            self.oracle.edge_length(),
        )
    }
}
