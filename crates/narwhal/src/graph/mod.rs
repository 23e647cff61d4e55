use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Read-only view of a host graph, captured once at the start of a layout run.
///
/// Ordinals are dense in `[0, node_count())` and follow the order the host reports nodes in.
/// `neighbors` yields the keys of the open neighborhood of a node; duplicates and self-loops are
/// tolerated and dropped by [`NeighborhoodIndex`](crate::algo::mds::NeighborhoodIndex).
pub trait GraphSource {
    fn node_count(&self) -> usize;

    fn node_key(&self, ordinal: usize) -> &str;

    fn neighbors(&self, ordinal: usize) -> impl Iterator<Item = &str> + '_;

    /// Every edge as a key pair, when the source stores an edge list.
    ///
    /// Sources that return `Some` are indexed in one pass over the list and `neighbors` is never
    /// called. Edge-list graphs should implement this: answering `neighbors` from an edge list
    /// costs a full scan per node.
    fn edges(&self) -> Option<impl Iterator<Item = (&str, &str)> + '_> {
        None::<std::iter::Empty<(&str, &str)>>
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn validate(&self) -> Result<()> {
        let mut node_exists: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for n in &self.nodes {
            node_exists.insert(n.id.as_str());
        }
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::MissingEndpoint {
                    edge_id: e.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn add_node(&mut self, id: impl Into<String>) -> &mut Self {
        self.nodes.push(Node { id: id.into() });
        self
    }

    /// Adds an undirected edge; the edge id is derived from the endpoints.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        let source = source.into();
        let target = target.into();
        self.edges.push(Edge {
            id: format!("{source}--{target}"),
            source,
            target,
        });
        self
    }
}

impl GraphSource for Graph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_key(&self, ordinal: usize) -> &str {
        self.nodes[ordinal].id.as_str()
    }

    fn neighbors(&self, ordinal: usize) -> impl Iterator<Item = &str> + '_ {
        let id = self.nodes[ordinal].id.as_str();
        self.edges.iter().filter_map(move |e| {
            if e.source == id {
                Some(e.target.as_str())
            } else if e.target == id {
                Some(e.source.as_str())
            } else {
                None
            }
        })
    }

    fn edges(&self) -> Option<impl Iterator<Item = (&str, &str)> + '_> {
        Some(
            self.edges
                .iter()
                .map(|e| (e.source.as_str(), e.target.as_str())),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
}

/// Undirected edge. Direction is ignored by the layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Final positions keyed by node id, in node-ordinal order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    pub positions: IndexMap<String, Point>,
}
