use crate::geometry::{Edge, Polygon};
use crate::operations::sweep::{process, push_edges, push_polygons, TaggedEdge};
use crate::topology::{output_edges, output_polygons, OutputOptions};

use super::select::{BooleanMode, TAG_A, TAG_B};

/// Computes a boolean combination of two inputs.
///
/// Each input may overlap itself; a point belongs to an input when its wrap
/// count for that input is nonzero.
#[derive(Debug, Clone, Copy)]
pub struct Boolean {
    mode: BooleanMode,
    output: OutputOptions,
}

impl Boolean {
    /// Creates a new `Boolean` operation.
    #[must_use]
    pub fn new(mode: BooleanMode) -> Self {
        Self {
            mode,
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
    pub fn execute_p2e(&self, a: &[Polygon], b: &[Polygon]) -> Vec<Edge> {
        output_edges(&self.boundary(&polygon_input(a, b)))
    }

    /// Polygons in, polygons out.
    #[must_use]
    pub fn execute_p2p(&self, a: &[Polygon], b: &[Polygon]) -> Vec<Polygon> {
        output_polygons(self.boundary(&polygon_input(a, b)), self.output)
    }

    /// Edges in, edges out.
    #[must_use]
    pub fn execute_e2e(&self, a: &[Edge], b: &[Edge]) -> Vec<Edge> {
        output_edges(&self.boundary(&edge_input(a, b)))
    }

    /// Edges in, polygons out.
    #[must_use]
    pub fn execute_e2p(&self, a: &[Edge], b: &[Edge]) -> Vec<Polygon> {
        output_polygons(self.boundary(&edge_input(a, b)), self.output)
    }

    fn boundary(&self, input: &[TaggedEdge]) -> Vec<Edge> {
        tracing::debug!(mode = self.mode.name(), edges = input.len(), "boolean");
        process(input, &self.mode)
    }
}

fn polygon_input(a: &[Polygon], b: &[Polygon]) -> Vec<TaggedEdge> {
    let mut input = Vec::new();
    push_polygons(&mut input, a, TAG_A);
    push_polygons(&mut input, b, TAG_B);
    input
}

fn edge_input(a: &[Edge], b: &[Edge]) -> Vec<TaggedEdge> {
    let mut input = Vec::new();
    push_edges(&mut input, a, TAG_A);
    push_edges(&mut input, b, TAG_B);
    input
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::geometry::{parse_polygons, to_text, Point, Rect};
    use crate::operations::boolean::{mode_and, mode_anotb, mode_bnota, mode_or, mode_xor};

    fn a() -> Vec<Polygon> {
        vec![Rect::new(0, 0, 1000, 1000).to_polygon()]
    }

    fn b() -> Vec<Polygon> {
        vec![Rect::new(100, 100, 1100, 1100).to_polygon()]
    }

    fn coherent() -> OutputOptions {
        OutputOptions {
            resolve_holes: true,
            min_coherence: true,
        }
    }

    #[test]
    fn or_of_overlapping_boxes_as_edges() {
        let edges = Boolean::new(mode_or()).execute_p2e(&a(), &b());
        assert_eq!(
            to_text(&edges),
            "(0,0;0,1000);(1000,0;0,0);(1000,100;1000,0);(1100,100;1000,100);\
             (1100,1100;1100,100);(0,1000;100,1000);(100,1000;100,1100);(100,1100;1100,1100)"
        );
    }

    #[test]
    fn and_is_the_overlap() {
        let polys = Boolean::new(mode_and()).execute_p2p(&a(), &b());
        assert_eq!(to_text(&polys), "(100,100;100,1000;1000,1000;1000,100)");
    }

    #[test]
    fn differences() {
        let anotb = Boolean::new(mode_anotb()).with_output(coherent()).execute_p2p(&a(), &b());
        assert_eq!(to_text(&anotb), "(0,0;0,1000;100,1000;100,100;1000,100;1000,0)");
        let bnota = Boolean::new(mode_bnota()).with_output(coherent()).execute_p2p(&a(), &b());
        assert_eq!(to_text(&bnota), "(1000,100;1000,1000;100,1000;100,1100;1100,1100;1100,100)");
    }

    #[test]
    fn coherent_xor_is_both_differences() {
        let xor = Boolean::new(mode_xor()).with_output(coherent()).execute_p2p(&a(), &b());
        assert_eq!(
            to_text(&xor),
            "(0,0;0,1000;100,1000;100,100;1000,100;1000,0);\
             (1000,100;1000,1000;100,1000;100,1100;1100,1100;1100,100)"
        );
    }

    #[test]
    fn incoherent_xor_keeps_touching_hole() {
        let options = OutputOptions {
            resolve_holes: false,
            min_coherence: false,
        };
        let xor = Boolean::new(mode_xor()).with_output(options).execute_p2p(&a(), &b());
        assert_eq!(
            to_text(&xor),
            "(0,0;0,1000;100,1000;100,1100;1100,1100;1100,100;1000,100;1000,0)/\
             (100,100;1000,100;1000,1000;100,1000)"
        );
    }

    #[test]
    fn edge_inputs_match_polygon_inputs() {
        let ea: Vec<Edge> = a().iter().flat_map(Polygon::edges).collect();
        let eb: Vec<Edge> = b().iter().flat_map(Polygon::edges).collect();
        let op = Boolean::new(mode_xor());
        assert_eq!(op.execute_e2e(&ea, &eb), op.execute_p2e(&a(), &b()));
        assert_eq!(op.execute_e2p(&ea, &eb), op.execute_p2p(&a(), &b()));
    }

    #[test]
    fn empty_inputs() {
        let op = Boolean::new(mode_anotb());
        assert!(op.execute_p2p(&[], &b()).is_empty());
        assert_eq!(op.execute_p2p(&a(), &[]), a());
    }

    /// Every vertex of a closed boundary has as many edges in as out.
    fn balanced(edges: &[Edge]) -> bool {
        let mut degree: HashMap<Point, i32> = HashMap::new();
        for e in edges {
            *degree.entry(e.p1).or_default() += 1;
            *degree.entry(e.p2).or_default() -= 1;
        }
        degree.values().all(|&d| d == 0)
    }

    fn total_area2(polys: &[Polygon]) -> i128 {
        polys.iter().map(Polygon::area2).sum()
    }

    /// Checks closure in every mode and the area identities between modes.
    fn assert_consistent(a: &[Polygon], b: &[Polygon]) -> [i128; 5] {
        let modes = [mode_or(), mode_and(), mode_xor(), mode_anotb(), mode_bnota()];
        let mut areas = [0; 5];
        for (area, mode) in areas.iter_mut().zip(modes) {
            let op = Boolean::new(mode).with_output(coherent());
            let edges = op.execute_p2e(a, b);
            assert!(balanced(&edges), "{} leaves open ends: {}", mode.name(), to_text(&edges));
            *area = total_area2(&op.execute_p2p(a, b));
        }
        let [or, and, xor, anotb, bnota] = areas;
        assert_eq!(or, xor + and);
        assert_eq!(xor, anotb + bnota);
        areas
    }

    #[test]
    fn or_of_slanted_triangles_covers_both() {
        let a = parse_polygons("(950,119;140,716;808,349)").unwrap();
        let b = parse_polygons("(609,370;163,758;332,725)").unwrap();
        assert_eq!(total_area2(&a), 101_526);
        assert_eq!(total_area2(&b), 50_854);

        let [or, ..] = assert_consistent(&a, &b);
        // Snapping moves the boundary by at most half a unit per vertex.
        assert!(or * 100 >= 101_526 * 99, "or area2 {or}");
        assert!(or <= 101_526 + 50_854 + 1000, "or area2 {or}");
    }

    #[test]
    fn xor_of_rotated_square_and_box() {
        let a = parse_polygons("(0,300;700,0;1000,700;300,1000)").unwrap();
        let b = vec![Rect::new(100, 100, 900, 900).to_polygon()];
        let [or, and, ..] = assert_consistent(&a, &b);
        assert!(and > 0 && and < or);
        assert!(or >= total_area2(&a).max(total_area2(&b)) * 99 / 100);
    }

    #[test]
    fn random_triangles_stay_closed() {
        let mut state: u32 = 0x2545_f491;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            i32::try_from(state % 24).unwrap()
        };
        let mut triangle = || {
            Polygon::raw(vec![Point::new(next(), next()), Point::new(next(), next()), Point::new(next(), next())])
        };
        for _ in 0..300 {
            let a = [triangle()];
            let b = [triangle()];
            for mode in [mode_or(), mode_xor()] {
                let edges = Boolean::new(mode).execute_p2e(&a, &b);
                assert!(balanced(&edges), "{} of {} and {}: {}", mode.name(), a[0], b[0], to_text(&edges));
            }
        }
    }
}
