mod corner;

pub use corner::{cutoff_degrees, sized_contour};

use crate::geometry::{Edge, Polygon};
use crate::math::Coord;
use crate::operations::merge::SimpleMerge;
use crate::operations::sweep::{process, push_edges, push_polygons, TaggedEdge, WindingRule};
use crate::topology::{output_edges, output_polygons, OutputOptions};

/// Default sizing mode: corners bending by more than 90 degrees are cut off.
pub const DEFAULT_SIZE_MODE: u32 = 2;

/// Grows (positive) or shrinks (negative) polygons by `dx` horizontally and
/// `dy` vertically.
///
/// The input is merged first, so overlapping polygons size as their union.
/// `mode` selects the corner cutoff angle, see [`cutoff_degrees`].
#[derive(Debug, Clone, Copy)]
pub struct Size {
    dx: Coord,
    dy: Coord,
    mode: u32,
    output: OutputOptions,
}

impl Size {
    /// Creates a new anisotropic `Size` operation.
    #[must_use]
    pub fn new(dx: Coord, dy: Coord) -> Self {
        Self {
            dx,
            dy,
            mode: DEFAULT_SIZE_MODE,
            output: OutputOptions::default(),
        }
    }

    /// Creates a `Size` operation with the same amount in both directions.
    #[must_use]
    pub fn isotropic(d: Coord) -> Self {
        Self::new(d, d)
    }

    /// Sets the corner mode.
    #[must_use]
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
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
        output_edges(&self.boundary(polygons))
    }

    /// Polygons in, polygons out.
    #[must_use]
    pub fn execute_p2p(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        output_polygons(self.boundary(polygons), self.output)
    }

    fn boundary(&self, polygons: &[Polygon]) -> Vec<Edge> {
        tracing::debug!(
            dx = self.dx,
            dy = self.dy,
            mode = self.mode,
            polygons = polygons.len(),
            "size"
        );

        // Step 1: merge the input into clean contours
        let merged = SimpleMerge::new()
            .with_output(OutputOptions {
                resolve_holes: false,
                min_coherence: true,
            })
            .execute_p2p(polygons);

        let mut input: Vec<TaggedEdge> = Vec::new();
        if self.dx == 0 && self.dy == 0 {
            push_polygons(&mut input, &merged, 0);
            return process(&input, &WindingRule::NonZero);
        }

        // Step 2: build a raw sized loop per contour
        let (dx, dy) = (f64::from(self.dx), f64::from(self.dy));
        for poly in &merged {
            for contour in poly.contours() {
                let sized = sized_contour(contour, dx, dy, self.mode);
                let n = sized.len();
                let edges: Vec<Edge> = (0..n).map(|i| Edge::new(sized[i], sized[(i + 1) % n])).collect();
                push_edges(&mut input, &edges, 0);
            }
        }

        // Step 3: keep what the sized loops cover positively
        process(&input, &WindingRule::Positive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{to_text, Point, Rect};

    fn unit_box() -> Vec<Polygon> {
        vec![Rect::new(0, 0, 1000, 1000).to_polygon()]
    }

    #[test]
    fn grow_box_in_mode_2() {
        let polys = Size::isotropic(100).execute_p2p(&unit_box());
        assert_eq!(to_text(&polys), "(-100,-100;-100,1100;1100,1100;1100,-100)");
    }

    #[test]
    fn shrink_box_as_edges() {
        let edges = Size::isotropic(-100).execute_p2e(&unit_box());
        assert_eq!(
            to_text(&edges),
            "(100,100;100,900);(900,100;100,100);(900,900;900,100);(100,900;900,900)"
        );
    }

    #[test]
    fn mode_0_cuts_all_corners() {
        let edges = Size::isotropic(100).with_mode(0).execute_p2e(&unit_box());
        assert_eq!(edges.len(), 8);
        assert_eq!(
            to_text(&edges),
            "(-41,-100;-100,-41);(1041,-100;-41,-100);(1100,-41;1041,-100);(-100,-41;-100,1041);\
             (1100,1041;1100,-41);(-100,1041;-41,1100);(1041,1100;1100,1041);(-41,1100;1041,1100)"
        );
    }

    #[test]
    fn anisotropic_grow() {
        let polys = Size::new(100, 0).execute_p2p(&unit_box());
        assert_eq!(to_text(&polys), "(-100,0;-100,1000;1100,1000;1100,0)");
    }

    #[test]
    fn zero_size_is_merge() {
        let overlapping = vec![
            Rect::new(0, 0, 500, 500).to_polygon(),
            Rect::new(500, 0, 1000, 500).to_polygon(),
        ];
        let polys = Size::isotropic(0).execute_p2p(&overlapping);
        assert_eq!(to_text(&polys), "(0,0;0,500;1000,500;1000,0)");
    }

    #[test]
    fn shrinking_past_collapse_is_empty() {
        let small = vec![Rect::new(0, 0, 100, 100).to_polygon()];
        assert!(Size::isotropic(-60).execute_p2p(&small).is_empty());
    }

    #[test]
    fn growing_closes_narrow_gaps() {
        let pair = vec![
            Rect::new(0, 0, 100, 100).to_polygon(),
            Rect::new(150, 0, 250, 100).to_polygon(),
        ];
        let polys = Size::isotropic(30).execute_p2p(&pair);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].bbox(), Rect::new(-30, -30, 280, 130));
    }

    #[test]
    fn hole_shrinks_when_growing() {
        let frame = Rect::new(0, 0, 1000, 1000)
            .to_polygon()
            .with_hole([Point::new(300, 300), Point::new(700, 300), Point::new(700, 700), Point::new(300, 700)]);
        let polys = Size::isotropic(100)
            .with_output(OutputOptions {
                resolve_holes: false,
                min_coherence: true,
            })
            .execute_p2p(&[frame]);
        assert_eq!(
            to_text(&polys),
            "(-100,-100;-100,1100;1100,1100;1100,-100)/(400,400;600,400;600,600;400,600)"
        );
    }
}
