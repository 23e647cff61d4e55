//! Distance-scaling layout.
//!
//! Pipeline: [`NeighborhoodIndex`] → BFS rows from [`DistanceOracle`] (sources chosen by
//! [`PivotSampler`] and [`MatrixShape`]) → [`DistanceMatrix`] → [`SpectralProjector`] →
//! [`CoordinateTable`].
//!
//! Graphs below `pivot_cap` nodes get the full all-pairs matrix. Larger graphs only run BFS from
//! the sampled pivots, which keeps the cost at `O(pivots · (n + m))` instead of `O(n · (n + m))`.

mod bfs;
mod matrix;
mod neighborhood;
mod pivots;
mod spectral;

pub use bfs::{DistanceOracle, DistanceRow, UNREACHABLE};
pub use matrix::{DistanceMatrix, DistanceMatrixBuilder, MatrixShape};
pub use neighborhood::NeighborhoodIndex;
pub use pivots::{PivotSampler, PivotSet, SampledPivots};
pub use spectral::{CoordinateTable, DIMENSIONS, EigenPair, SpectralOutput, SpectralProjector};

use std::time::Instant;

use crate::algo::MdsOptions;
use crate::algo::rng::XorShift64Star;
use crate::error::Result;
use crate::graph::{GraphSource, Point};
use crate::placement::{CoordinateSink, PlacementOptions};

/// Everything one run produced. Nothing here is shared with later runs.
#[derive(Debug, Clone)]
pub struct Projection {
    pub coordinates: CoordinateTable,
    pub pivots: PivotSet,
    /// `None` when the graph was too small for a matrix (fewer than two nodes).
    pub shape: Option<MatrixShape>,
    pub eigenpairs: Vec<EigenPair>,
    /// Number of single-source BFS traversals performed.
    pub bfs_runs: usize,
    /// Some BFS row could not reach every node.
    pub disconnected: bool,
}

impl Projection {
    fn trivial(node_count: usize) -> Self {
        Self {
            coordinates: CoordinateTable::new(vec![Point::ORIGIN; node_count]),
            pivots: PivotSet::default(),
            shape: None,
            eigenpairs: Vec::new(),
            bfs_runs: 0,
            disconnected: false,
        }
    }

    pub fn converged(&self) -> bool {
        self.eigenpairs.iter().all(|p| p.converged)
    }
}

/// Per-run state: owned by a single [`project`] call and dropped with it.
struct RunContext<'a> {
    options: &'a MdsOptions,
    index: NeighborhoodIndex,
    rng: XorShift64Star,
}

impl<'a> RunContext<'a> {
    fn new(options: &'a MdsOptions, index: NeighborhoodIndex) -> Self {
        let rng = match options.random_seed {
            Some(seed) => XorShift64Star::new(seed),
            None => XorShift64Star::from_entropy(),
        };
        Self {
            options,
            index,
            rng,
        }
    }

    fn run(&mut self) -> Result<Projection> {
        let n = self.index.node_count();
        if n <= 1 {
            return Ok(Projection::trivial(n));
        }

        let cancel = self.options.cancel.as_ref();
        let oracle = DistanceOracle::new(&self.index, self.options.ideal_edge_length);

        let sample_start = Instant::now();
        let first = self.rng.next_usize(n);
        let sampled = PivotSampler::new(oracle)
            .with_cancel(cancel)
            .sample(self.options.pivot_cap, first)?;
        let sample_elapsed = sample_start.elapsed();

        let shape = MatrixShape::resolve(self.options.matrix_mode, n, self.options.pivot_cap);
        let pivot_count = sampled.pivots.len();
        let bfs_runs = match shape {
            MatrixShape::Full => n,
            MatrixShape::Landmark => pivot_count,
        };

        let matrix_start = Instant::now();
        let matrix = DistanceMatrixBuilder::new(oracle)
            .with_cancel(cancel)
            .build(shape, sampled.rows)?;
        let matrix_elapsed = matrix_start.elapsed();
        if matrix.is_clamped() {
            tracing::debug!(
                nodes = n,
                "graph is disconnected; unreachable distances were clamped"
            );
        }

        let spectral_start = Instant::now();
        let output = SpectralProjector::new(self.options.epsilon, self.options.max_sweeps)
            .with_cancel(cancel)
            .project_with_rng(&matrix, &mut self.rng)?;
        let spectral_elapsed = spectral_start.elapsed();

        tracing::debug!(
            nodes = n,
            edges = self.index.edge_count(),
            ?shape,
            pivots = pivot_count,
            bfs_runs,
            eigenvalues = ?output.eigenpairs.iter().map(|p| p.value).collect::<Vec<_>>(),
            sweeps = ?output.eigenpairs.iter().map(|p| p.sweeps).collect::<Vec<_>>(),
            ?sample_elapsed,
            ?matrix_elapsed,
            ?spectral_elapsed,
            "mds layout finished"
        );

        Ok(Projection {
            coordinates: output.coordinates,
            pivots: sampled.pivots,
            shape: Some(shape),
            eigenpairs: output.eigenpairs,
            bfs_runs,
            disconnected: matrix.is_clamped(),
        })
    }
}

/// Computes coordinates for every node of `graph`, indexed by node ordinal.
pub fn project<G: GraphSource + ?Sized>(graph: &G, options: &MdsOptions) -> Result<Projection> {
    options.validate()?;
    let span = tracing::debug_span!("mds", nodes = graph.node_count());
    let _guard = span.enter();

    let index = NeighborhoodIndex::build(graph)?;
    if let Some(token) = options.cancel.as_ref() {
        token.check()?;
    }
    RunContext::new(options, index).run()
}

/// [`project`], then hands every position to `sink` in ordinal order between the host's `ready`
/// and `stop` hooks.
pub fn run<G, S>(
    graph: &G,
    options: &MdsOptions,
    placement: &PlacementOptions,
    sink: &mut S,
) -> Result<Projection>
where
    G: GraphSource + ?Sized,
    S: CoordinateSink + ?Sized,
{
    let projection = project(graph, options)?;
    placement.notify_ready();
    for (ordinal, point) in projection.coordinates.iter().enumerate() {
        sink.place(graph.node_key(ordinal), ordinal, point, placement);
    }
    placement.notify_stop();
    Ok(projection)
}
