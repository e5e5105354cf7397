use crate::geometry::{Edge, Polygon};
use crate::operations::sweep::{process, push_polygons, CoverageCount, TaggedEdge};
use crate::topology::{output_edges, output_polygons, OutputOptions};

/// Merges polygons by vote: a point is kept where more than `min_count`
/// input polygons cover it.
///
/// Each polygon counts once no matter how often it overlaps itself.
/// `min_count = 0` is a plain union.
#[derive(Debug, Clone, Copy)]
pub struct Merge {
    min_count: usize,
    output: OutputOptions,
}

impl Merge {
    /// Creates a new `Merge` operation.
    #[must_use]
    pub fn new(min_count: usize) -> Self {
        Self {
            min_count,
            output: OutputOptions::default(),
        }
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
        output_edges(&self.boundary(polygons))
    }

    /// Polygons in, polygons out.
    #[must_use]
    pub fn execute_p2p(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        output_polygons(self.boundary(polygons), self.output)
    }

    fn boundary(&self, polygons: &[Polygon]) -> Vec<Edge> {
        let mut input: Vec<TaggedEdge> = Vec::new();
        for (tag, poly) in (0..).zip(polygons) {
            push_polygons(&mut input, std::slice::from_ref(poly), tag);
        }
        tracing::debug!(min_count = self.min_count, polygons = polygons.len(), "merge");
        process(
            &input,
            &CoverageCount {
                min_count: self.min_count,
            },
        )
    }
}
