#![forbid(unsafe_code)]

//! Headless distance-scaling graph layout.
//!
//! `narwhal` places nodes so that Euclidean distance approximates hop distance: BFS distances are
//! collected into a matrix, and the two dominant eigenvectors of `D·Dᵗ / n` (found by power
//! iteration) become the x and y axes. Drawing concerns (animation, viewport, fitting) stay with
//! the host; see [`placement`].

pub mod algo;
pub mod cancel;
pub mod error;
pub mod graph;
pub mod placement;

pub use algo::mds::{CoordinateTable, Projection};
pub use algo::{Algorithm, MatrixMode, MdsOptions};
pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphSource, LayoutResult, Node, Point};
pub use placement::{BoundingBox, CoordinateSink, HostHook, PlacementOptions};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: Algorithm) -> Result<LayoutResult> {
    layout_with_placement(graph, algorithm, &PlacementOptions::default())
}

/// [`layout`] with explicit host placement settings, which are carried through untouched.
pub fn layout_with_placement(
    graph: &Graph,
    algorithm: Algorithm,
    placement: &PlacementOptions,
) -> Result<LayoutResult> {
    graph.validate()?;

    let mut result = LayoutResult::default();
    match algorithm {
        Algorithm::Mds(opts) => {
            algo::mds::run(graph, &opts, placement, &mut result)?;
        }
    }
    Ok(result)
}
