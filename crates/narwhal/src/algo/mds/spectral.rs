use nalgebra::{DMatrix, DVector};

use super::{DistanceMatrix, MatrixShape};
use crate::algo::rng::XorShift64Star;
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::graph::Point;

const SMALL: f64 = 1e-12;

/// Layout dimensions kept from the spectrum.
pub const DIMENSIONS: usize = 2;

#[derive(Debug, Clone)]
pub struct EigenPair {
    /// Rayleigh quotient of `vector`, clamped to `>= 0`.
    pub value: f64,
    /// Unit vector in the space of the covariance matrix (`p` entries for landmark matrices).
    pub vector: DVector<f64>,
    pub sweeps: usize,
    /// `false` when the sweep cap was hit before the cosine threshold.
    pub converged: bool,
}

/// Final `(x, y)` per node ordinal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    points: Vec<Point>,
}

impl CoordinateTable {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<Point> {
        self.points.get(ordinal).copied()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}

#[derive(Debug, Clone)]
pub struct SpectralOutput {
    pub eigenpairs: Vec<EigenPair>,
    pub coordinates: CoordinateTable,
}

/// Power iteration with deflation over `C = D·Dᵗ / n`.
#[derive(Debug, Clone, Copy)]
pub struct SpectralProjector<'a> {
    epsilon: f64,
    max_sweeps: usize,
    cancel: Option<&'a CancelToken>,
}

impl<'a> SpectralProjector<'a> {
    pub fn new(epsilon: f64, max_sweeps: usize) -> Self {
        Self {
            epsilon,
            max_sweeps: max_sweeps.max(1),
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: Option<&'a CancelToken>) -> Self {
        self.cancel = cancel;
        self
    }

    /// `D·Dᵗ` divided by the node count (column count of `D`).
    pub fn covariance(matrix: &DistanceMatrix) -> DMatrix<f64> {
        let d = matrix.as_matrix();
        let n = d.ncols().max(1) as f64;
        (d * d.transpose()) / n
    }

    pub fn project(&self, matrix: &DistanceMatrix, seed: u64) -> Result<SpectralOutput> {
        let mut rng = XorShift64Star::new(seed);
        self.project_with_rng(matrix, &mut rng)
    }

    pub(crate) fn project_with_rng(
        &self,
        matrix: &DistanceMatrix,
        rng: &mut XorShift64Star,
    ) -> Result<SpectralOutput> {
        let n = matrix.node_count();
        if n <= 1 {
            return Ok(SpectralOutput {
                eigenpairs: Vec::new(),
                coordinates: CoordinateTable::new(vec![Point::ORIGIN; n]),
            });
        }

        let c = Self::covariance(matrix);
        let eigenpairs = self.dominant_eigenpairs_with_rng(&c, DIMENSIONS, rng)?;

        let mut axes: Vec<DVector<f64>> = Vec::with_capacity(DIMENSIONS);
        for pair in &eigenpairs {
            let unit = match matrix.shape() {
                MatrixShape::Full => pair.vector.clone(),
                MatrixShape::Landmark => lift_to_nodes(matrix.as_matrix(), &pair.vector),
            };
            axes.push(unit * pair.value.sqrt());
        }
        // A p×p landmark matrix with p < 2 has no second direction.
        while axes.len() < DIMENSIONS {
            axes.push(DVector::<f64>::zeros(n));
        }

        let points = (0..n)
            .map(|i| Point {
                x: axes[0][i],
                y: axes[1][i],
            })
            .collect();

        Ok(SpectralOutput {
            eigenpairs,
            coordinates: CoordinateTable::new(points),
        })
    }

    pub fn dominant_eigenpairs(
        &self,
        c: &DMatrix<f64>,
        count: usize,
        seed: u64,
    ) -> Result<Vec<EigenPair>> {
        let mut rng = XorShift64Star::new(seed);
        self.dominant_eigenpairs_with_rng(c, count, &mut rng)
    }

    pub(crate) fn dominant_eigenpairs_with_rng(
        &self,
        c: &DMatrix<f64>,
        count: usize,
        rng: &mut XorShift64Star,
    ) -> Result<Vec<EigenPair>> {
        let dim = c.nrows();
        let count = count.min(dim);

        let mut found: Vec<EigenPair> = Vec::with_capacity(count);
        for k in 0..count {
            let mut start = DVector::<f64>::from_fn(dim, |_, _| rng.next_f64_unit());
            if !normalize_in_place(&mut start) {
                start = DVector::<f64>::zeros(dim);
                start[k] = 1.0;
            }

            let previous: Vec<&DVector<f64>> = found.iter().map(|p| &p.vector).collect();
            let pair = self.power_iterate(c, &previous, start)?;
            if !pair.converged {
                tracing::warn!(
                    eigenvector = k,
                    sweeps = pair.sweeps,
                    eigenvalue = pair.value,
                    "power iteration hit the sweep cap before converging"
                );
            }
            found.push(pair);
        }

        Ok(found)
    }

    fn power_iterate(
        &self,
        c: &DMatrix<f64>,
        previous: &[&DVector<f64>],
        mut y: DVector<f64>,
    ) -> Result<EigenPair> {
        let threshold = 1.0 - self.epsilon;
        let mut converged = false;
        let mut sweeps = 0;

        for sweep in 1..=self.max_sweeps {
            if let Some(token) = self.cancel {
                token.check()?;
            }
            sweeps = sweep;

            let mut v = y.clone();
            orthogonalize(&mut v, previous);
            if !normalize_in_place(&mut v) {
                // The iterate lies in the span of the earlier eigenvectors: nothing left to find.
                return Ok(EigenPair {
                    value: 0.0,
                    vector: v,
                    sweeps,
                    converged: true,
                });
            }

            let mut next = c * &v;
            let theta = v.dot(&next);
            if !normalize_in_place(&mut next) {
                // `C·v` vanished; `v` spans part of the null space.
                y = v;
                converged = true;
                break;
            }

            let cosine = v.dot(&next);
            tracing::trace!(sweep, theta, cosine, "power iteration sweep");
            y = next;
            if cosine >= threshold {
                converged = true;
                break;
            }
        }

        // `C·v` drifts back toward earlier eigenvectors by rounding.
        let before = y.clone();
        orthogonalize(&mut y, previous);
        if !normalize_in_place(&mut y) {
            y = before;
        }

        let value = rayleigh_quotient(c, &y).max(0.0);
        Ok(EigenPair {
            value,
            vector: y,
            sweeps,
            converged,
        })
    }
}

/// Subtracts the projection of `v` onto each of `basis` (assumed orthonormal).
fn orthogonalize(v: &mut DVector<f64>, basis: &[&DVector<f64>]) {
    for &e in basis {
        let proj = v.dot(e);
        v.axpy(-proj, e, 1.0);
    }
}

fn rayleigh_quotient(c: &DMatrix<f64>, v: &DVector<f64>) -> f64 {
    let denom = v.dot(v);
    if denom < SMALL {
        return 0.0;
    }
    v.dot(&(c * v)) / denom
}

/// Maps an eigenvector `u` of `D·Dᵗ` to the unit eigenvector `Dᵗu / |Dᵗu|` of `Dᵗ·D`.
fn lift_to_nodes(d: &DMatrix<f64>, u: &DVector<f64>) -> DVector<f64> {
    let mut lifted = d.transpose() * u;
    if !normalize_in_place(&mut lifted) {
        lifted.fill(0.0);
    }
    lifted
}

/// Returns `false` (leaving `v` untouched) when `v` has no usable direction.
fn normalize_in_place(v: &mut DVector<f64>) -> bool {
    let norm = v.norm();
    if norm.is_finite() && norm > SMALL {
        *v /= norm;
        true
    } else {
        false
    }
}
