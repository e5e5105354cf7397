//! Scanline core shared by all edge processor operations.
//!
//! Input edges are noded, grouped into unique segments and swept bottom to
//! top. An [`InsideTest`] turns the per-tag wrap counts into the inside
//! predicate; the result is the set of directed boundary fragments with the
//! inside on their right.

mod noding;
mod scanline;
mod wrap;

pub use noding::node_edges;
pub use scanline::classify;
pub use wrap::{CoverageCount, InsideTest, Tag, WindingRule, WrapCounts};

use crate::geometry::{Edge, Polygon};

/// An edge labelled with the input it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedEdge {
    pub edge: Edge,
    pub tag: Tag,
}

impl TaggedEdge {
    #[must_use]
    pub const fn new(edge: Edge, tag: Tag) -> Self {
        Self { edge, tag }
    }
}

/// Appends all edges of `polygons` under one tag.
pub fn push_polygons(out: &mut Vec<TaggedEdge>, polygons: &[Polygon], tag: Tag) {
    for poly in polygons {
        out.extend(poly.edges().map(|e| TaggedEdge::new(e, tag)));
    }
}

/// Appends `edges` under one tag.
pub fn push_edges(out: &mut Vec<TaggedEdge>, edges: &[Edge], tag: Tag) {
    out.extend(edges.iter().map(|&e| TaggedEdge::new(e, tag)));
}

/// Runs the full sweep: noding followed by boundary selection.
#[must_use]
pub fn process(input: &[TaggedEdge], test: &dyn InsideTest) -> Vec<Edge> {
    let noded = node_edges(input);
    tracing::trace!(input = input.len(), noded = noded.len(), "noded edges");
    let boundary = classify(&noded, test);
    tracing::trace!(boundary = boundary.len(), "selected boundary");
    boundary
}
