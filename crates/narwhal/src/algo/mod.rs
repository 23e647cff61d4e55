pub mod mds;
pub(crate) mod rng;

use crate::cancel::CancelToken;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Distance-scaling layout: BFS hop distances projected onto their top two eigenvectors.
    Mds(MdsOptions),
}

/// Which BFS sources feed the distance matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatrixMode {
    /// Full matrix below `pivot_cap` nodes, landmark matrix at or above it.
    #[default]
    Auto,
    /// Always BFS from every node (`n×n`). Pivots are still sampled.
    Full,
    /// Always BFS from the sampled pivots only (`p×n`).
    Landmark,
}

#[derive(Debug, Clone)]
pub struct MdsOptions {
    /// Upper bound on the number of landmark nodes; also the node count at which `Auto` switches
    /// from the full matrix to the landmark matrix.
    pub pivot_cap: usize,
    /// Layout units per BFS hop.
    pub ideal_edge_length: f64,
    /// Power iteration stops once successive iterates have cosine similarity `>= 1 - epsilon`.
    pub epsilon: f64,
    /// Seed for deterministic layouts. `None` seeds from the clock.
    pub random_seed: Option<u64>,
    /// Sweep cap per eigenvector. The last iterate is accepted when it is hit.
    pub max_sweeps: usize,
    pub matrix_mode: MatrixMode,
    pub cancel: Option<CancelToken>,
}

impl MdsOptions {
    pub const DEFAULT_PIVOT_CAP: usize = 50;
    pub const DEFAULT_IDEAL_EDGE_LENGTH: f64 = 45.0;
    pub const DEFAULT_EPSILON: f64 = 0.001;
    pub const DEFAULT_MAX_SWEEPS: usize = 500;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_matrix_mode(mut self, mode: MatrixMode) -> Self {
        self.matrix_mode = mode;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pivot_cap == 0 {
            return Err(Error::invalid("pivot_cap must be at least 1"));
        }
        if !(self.ideal_edge_length.is_finite() && self.ideal_edge_length > 0.0) {
            return Err(Error::invalid(format!(
                "ideal_edge_length must be a positive finite number, got {}",
                self.ideal_edge_length
            )));
        }
        if !(self.epsilon > 0.0 && self.epsilon < 1.0) {
            return Err(Error::invalid(format!(
                "epsilon must lie in (0, 1), got {}",
                self.epsilon
            )));
        }
        if self.max_sweeps == 0 {
            return Err(Error::invalid("max_sweeps must be at least 1"));
        }
        Ok(())
    }
}

impl Default for MdsOptions {
    fn default() -> Self {
        Self {
            pivot_cap: Self::DEFAULT_PIVOT_CAP,
            ideal_edge_length: Self::DEFAULT_IDEAL_EDGE_LENGTH,
            epsilon: Self::DEFAULT_EPSILON,
            random_seed: None,
            max_sweeps: Self::DEFAULT_MAX_SWEEPS,
            matrix_mode: MatrixMode::Auto,
            cancel: None,
        }
    }
}
