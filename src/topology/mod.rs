//! Output stage: turns directed boundary fragments into edge lists or
//! polygons.

pub mod edge;
pub mod holes;
pub mod trace;

pub use edge::{edge_order, join_collinear, EdgeId};
pub use holes::assemble_polygons;
pub use trace::trace_contours;

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::geometry::{Edge, Point, Polygon};

/// Options for polygon output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Join holes into their hull with cut lines.
    pub resolve_holes: bool,
    /// Keep regions touching at a corner as separate polygons.
    pub min_coherence: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            resolve_holes: true,
            min_coherence: true,
        }
    }
}

/// Arena of directed boundary edges indexed by start point.
///
/// Edges are removed as contour tracing consumes them; the outgoing index
/// keeps stale ids, which are skipped on lookup.
#[derive(Debug, Default)]
pub struct BoundaryGraph {
    edges: SlotMap<EdgeId, Edge>,
    outgoing: HashMap<Point, Vec<EdgeId>>,
}

impl BoundaryGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a set of edges.
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut graph = Self::new();
        for e in edges {
            graph.add_edge(e);
        }
        graph
    }

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, e: Edge) -> EdgeId {
        let id = self.edges.insert(e);
        self.outgoing.entry(e.p1).or_default().push(id);
        id
    }

    /// Returns the edge, or `None` if it was removed.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(id).copied()
    }

    /// Removes an edge and returns it.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.edges.remove(id)
    }

    /// Remaining edges starting at `p`.
    pub fn outgoing(&self, p: Point) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
        self.outgoing
            .get(&p)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.edge(id).map(|e| (id, e)))
    }

    /// IDs of the remaining edges in [`edge_order`].
    #[must_use]
    pub fn ids_in_order(&self) -> Vec<EdgeId> {
        let mut ids: Vec<(EdgeId, Edge)> = self.edges.iter().map(|(id, &e)| (id, e)).collect();
        ids.sort_by(|a, b| edge_order(&a.1, &b.1));
        ids.into_iter().map(|(id, _)| id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Final edge list: collinear fragments joined, sorted by [`edge_order`].
#[must_use]
pub fn output_edges(boundary: &[Edge]) -> Vec<Edge> {
    let mut edges = join_collinear(boundary);
    edges.sort_by(edge_order);
    edges
}

/// Final polygon list built from boundary fragments.
#[must_use]
pub fn output_polygons(boundary: Vec<Edge>, options: OutputOptions) -> Vec<Polygon> {
    let mut graph = BoundaryGraph::from_edges(boundary);
    let contours = trace_contours(&mut graph, options.min_coherence);
    tracing::trace!(contours = contours.len(), "traced contours");
    assemble_polygons(contours, options.resolve_holes)
}
