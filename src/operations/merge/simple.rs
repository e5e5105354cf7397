use crate::geometry::{Edge, Polygon};
use crate::operations::sweep::{process, push_edges, push_polygons, TaggedEdge, WindingRule};
use crate::topology::{output_edges, output_polygons, OutputOptions};

/// Merges polygons or edges into their union by total wrap count.
///
/// All input shares one wrap count, so a self-overlapping polygon and two
/// overlapping polygons are treated alike. Opposite coincident edges cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMerge {
    rule: WindingRule,
    output: OutputOptions,
}

impl SimpleMerge {
    /// Creates a merge with the non-zero rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the winding rule deciding which wrap counts are inside.
    #[must_use]
    pub fn with_rule(mut self, rule: WindingRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the polygon output options.
    #[must_use]
    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    /// Polygons in, edges out.
    #[must_use]
    pub fn execute_p2e(&self, polygons: &[Polygon]) -> Vec<Edge> {
        output_edges(&self.boundary(&polygon_input(polygons)))
    }

    /// Polygons in, polygons out.
    #[must_use]
    pub fn execute_p2p(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        output_polygons(self.boundary(&polygon_input(polygons)), self.output)
    }

    /// Edges in, edges out.
    #[must_use]
    pub fn execute_e2e(&self, edges: &[Edge]) -> Vec<Edge> {
        output_edges(&self.boundary(&edge_input(edges)))
    }

    /// Edges in, polygons out.
    #[must_use]
    pub fn execute_e2p(&self, edges: &[Edge]) -> Vec<Polygon> {
        output_polygons(self.boundary(&edge_input(edges)), self.output)
    }

    fn boundary(&self, input: &[TaggedEdge]) -> Vec<Edge> {
        tracing::debug!(rule = ?self.rule, edges = input.len(), "simple merge");
        process(input, &self.rule)
    }
}

fn polygon_input(polygons: &[Polygon]) -> Vec<TaggedEdge> {
    let mut input = Vec::new();
    push_polygons(&mut input, polygons, 0);
    input
}

fn edge_input(edges: &[Edge]) -> Vec<TaggedEdge> {
    let mut input = Vec::new();
    push_edges(&mut input, edges, 0);
    input
}
