mod triangulate;

pub use triangulate::Triangulate;

use crate::geometry::Point;

/// A triangle on the layout grid, counter-clockwise.
pub type Triangle = [Point; 3];

/// Parameters controlling triangulation.
#[derive(Debug, Clone, Copy)]
pub struct TriangulationParams {
    /// Minimum number of hull points; never less than 3.
    pub min_points: usize,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self { min_points: 3 }
    }
}
