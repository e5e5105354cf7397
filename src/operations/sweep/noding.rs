use crate::geometry::{Edge, Point, Rect};
use crate::math::intersect_2d::{cross, dot, point_inside_segment, segment_crossing};
use crate::math::Frac;

use super::TaggedEdge;

/// Splits edges into fragments that meet only at their endpoints.
///
/// Snap rounding: every endpoint and every crossing point, rounded to the
/// grid, makes its pixel (the unit square around the grid point) hot. Each
/// edge is rerouted through the center of every hot pixel it passes, so
/// edges running close to a rounded crossing or to a vertex are cut there
/// too and no rounded fragment crosses another. A last pass cuts fragments
/// at vertices lying exactly on them. Degenerate input edges are dropped.
pub fn node_edges(input: &[TaggedEdge]) -> Vec<TaggedEdge> {
    let edges: Vec<TaggedEdge> = input
        .iter()
        .filter(|e| !e.edge.is_degenerate())
        .copied()
        .collect();

    let hot = hot_pixels(&edges);
    let mut snapped = Vec::with_capacity(edges.len());
    for e in &edges {
        snap_through(e, &hot, &mut snapped);
    }
    split_at_vertices(&snapped)
}

/// Index pairs of edges whose bounding boxes touch.
///
/// Candidates come from a sweep over the bounding boxes' left sides.
fn candidate_pairs(edges: &[TaggedEdge]) -> Vec<(usize, usize)> {
    let boxes: Vec<Rect> = edges.iter().map(|e| e.edge.bbox()).collect();
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by_key(|&i| boxes[i].left);

    let mut pairs = Vec::new();
    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if boxes[j].left > boxes[i].right {
                break;
            }
            if boxes[i].touches(&boxes[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Centers of all hot pixels, sorted by x then y.
fn hot_pixels(edges: &[TaggedEdge]) -> Vec<Point> {
    let mut hot: Vec<Point> = edges.iter().flat_map(|e| [e.edge.p1, e.edge.p2]).collect();
    for (i, j) in candidate_pairs(edges) {
        let (a, b) = (edges[i].edge, edges[j].edge);
        if crosses_properly(a, b) {
            hot.extend(segment_crossing(a.p1, a.p2, b.p1, b.p2));
        }
    }
    hot.sort_unstable_by_key(|p| (p.x, p.y));
    hot.dedup();
    hot
}

fn crosses_properly(a: Edge, b: Edge) -> bool {
    let o1 = cross(a.p1, a.p2, b.p1).signum();
    let o2 = cross(a.p1, a.p2, b.p2).signum();
    let o3 = cross(b.p1, b.p2, a.p1).signum();
    let o4 = cross(b.p1, b.p2, a.p2).signum();
    o1 * o2 < 0 && o3 * o4 < 0
}

/// Emits `e` as a chain through the centers of the hot pixels it passes.
fn snap_through(e: &TaggedEdge, hot: &[Point], out: &mut Vec<TaggedEdge>) {
    let (p1, p2) = (e.edge.p1, e.edge.p2);
    let bbox = e.edge.bbox();

    // A pixel can only meet the edge if its center lies in the edge's bbox.
    let first = hot.partition_point(|h| h.x < bbox.left);
    let mut stops: Vec<Point> = hot[first..]
        .iter()
        .take_while(|h| h.x <= bbox.right)
        .filter(|h| h.y >= bbox.bottom && h.y <= bbox.top)
        .filter(|&&h| h != p1 && h != p2 && passes_pixel(p1, p2, h))
        .copied()
        .collect();
    stops.sort_by_key(|&h| (dot(p1, p2, h), cross(p1, p2, h)));

    let mut from = p1;
    for to in stops.into_iter().chain(std::iter::once(p2)) {
        if to != from {
            out.push(TaggedEdge::new(Edge::new(from, to), e.tag));
            from = to;
        }
    }
}

/// Bound on the segment parameter; `open` when the bound itself is excluded.
#[derive(Clone, Copy)]
struct Bound {
    t: Frac,
    open: bool,
}

/// Returns `true` if segment `a`-`b` meets the pixel of `h`.
///
/// The pixel is the half-open square `[h - 1/2, h + 1/2)` on both axes,
/// i.e. exactly the points that round to `h`. The segment is clipped
/// against it in doubled coordinates.
fn passes_pixel(a: Point, b: Point, h: Point) -> bool {
    let mut lo = Bound {
        t: Frac::from_int(0),
        open: false,
    };
    let mut hi = Bound {
        t: Frac::from_int(1),
        open: false,
    };

    for (from, to, center) in [(a.x, b.x, h.x), (a.y, b.y, h.y)] {
        let start = 2 * i128::from(from);
        let delta = 2 * (i128::from(to) - i128::from(from));
        let (min, max) = (2 * i128::from(center) - 1, 2 * i128::from(center) + 1);

        if delta == 0 {
            if start < min || start >= max {
                return false;
            }
            continue;
        }

        // start + delta * t >= min, and start + delta * t < max
        let at_min = Frac::new(min - start, delta);
        let at_max = Frac::new(max - start, delta);
        let (lower, upper) = if delta > 0 {
            (Bound { t: at_min, open: false }, Bound { t: at_max, open: true })
        } else {
            (Bound { t: at_max, open: true }, Bound { t: at_min, open: false })
        };
        if lower.t > lo.t || (lower.t == lo.t && lower.open) {
            lo = lower;
        }
        if upper.t < hi.t || (upper.t == hi.t && upper.open) {
            hi = upper;
        }
    }

    lo.t < hi.t || (lo.t == hi.t && !lo.open && !hi.open)
}

/// Cuts fragments at the endpoints of other fragments lying on them.
fn split_at_vertices(fragments: &[TaggedEdge]) -> Vec<TaggedEdge> {
    let mut cuts: Vec<Vec<Point>> = vec![Vec::new(); fragments.len()];
    for (i, j) in candidate_pairs(fragments) {
        let (a, b) = (fragments[i].edge, fragments[j].edge);
        cuts[i].extend([b.p1, b.p2].into_iter().filter(|&p| point_inside_segment(p, a.p1, a.p2)));
        cuts[j].extend([a.p1, a.p2].into_iter().filter(|&p| point_inside_segment(p, b.p1, b.p2)));
    }

    let mut result = Vec::with_capacity(fragments.len());
    for (e, points) in fragments.iter().zip(cuts) {
        split_at(e, points, &mut result);
    }
    result
}

/// Emits the pieces of `e` between consecutive cut points.
fn split_at(e: &TaggedEdge, mut points: Vec<Point>, out: &mut Vec<TaggedEdge>) {
    if points.is_empty() {
        out.push(*e);
        return;
    }

    let (p1, p2) = (e.edge.p1, e.edge.p2);
    points.push(p1);
    points.push(p2);
    points.sort_by_key(|&p| dot(p1, p2, p));
    points.dedup();

    for w in points.windows(2) {
        if w[0] != w[1] {
            out.push(TaggedEdge::new(Edge::new(w[0], w[1]), e.tag));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn e(x1: i32, y1: i32, x2: i32, y2: i32) -> TaggedEdge {
        TaggedEdge::new(Edge::new(p(x1, y1), p(x2, y2)), 0)
    }

    #[test]
    fn crossing_edges_split_both() {
        let out = node_edges(&[e(0, 1000, 2000, 1000), e(1000, 2000, 1000, 0)]);
        assert_eq!(out.len(), 4);
        assert!(out.contains(&e(0, 1000, 1000, 1000)));
        assert!(out.contains(&e(1000, 1000, 2000, 1000)));
        assert!(out.contains(&e(1000, 2000, 1000, 1000)));
        assert!(out.contains(&e(1000, 1000, 1000, 0)));
    }

    #[test]
    fn touching_endpoint_splits_other_edge() {
        let out = node_edges(&[e(0, 0, 0, 1000), e(0, 500, 300, 500)]);
        assert_eq!(out.len(), 3);
        assert!(out.contains(&e(0, 0, 0, 500)));
        assert!(out.contains(&e(0, 500, 0, 1000)));
    }

    #[test]
    fn collinear_overlap_cuts_at_shared_endpoints() {
        let out = node_edges(&[e(0, 0, 0, 1000), e(0, 100, 0, 300)]);
        assert_eq!(out.len(), 4);
        assert!(out.contains(&e(0, 100, 0, 300)));
        assert!(out.contains(&e(0, 300, 0, 1000)));
    }

    #[test]
    fn split_keeps_direction_and_drops_degenerate() {
        let out = node_edges(&[e(1000, 0, 0, 0), e(500, -10, 500, 10), e(7, 7, 7, 7)]);
        assert_eq!(out.len(), 4);
        assert!(out.contains(&e(1000, 0, 500, 0)));
        assert!(out.contains(&e(500, 0, 0, 0)));
    }

    #[test]
    fn disjoint_edges_pass_through() {
        let input = [e(0, 0, 10, 10), e(100, 0, 110, 10)];
        assert_eq!(node_edges(&input), input.to_vec());
    }

    #[test]
    fn edge_near_a_vertex_is_routed_through_it() {
        // The long edge passes (500, 0.5), inside the pixel of (500, 1).
        let out = node_edges(&[e(0, 0, 1000, 1), e(500, 1, 500, 100)]);
        assert_eq!(out.len(), 3);
        assert!(out.contains(&e(0, 0, 500, 1)));
        assert!(out.contains(&e(500, 1, 1000, 1)));
    }

    #[test]
    fn rounded_crossing_cuts_nearby_edges() {
        // The diagonals cross at (1.5, 0.5), rounded to (2, 1), where the
        // third edge starts. Both diagonals are rerouted through that point.
        let out = node_edges(&[e(0, 0, 3, 1), e(0, 1, 3, 0), e(2, 1, 2, 10)]);
        for piece in &out {
            for other in &out {
                assert!(!crosses_properly(piece.edge, other.edge), "{} x {}", piece.edge, other.edge);
            }
        }
        assert!(out.contains(&e(0, 0, 2, 1)));
        assert!(out.contains(&e(2, 1, 3, 1)));
    }

    #[test]
    fn pixels_are_half_open() {
        // (0,0)-(10,10) runs through the corner (4.5, 4.5), which belongs to
        // the pixel of (5, 5) only.
        assert!(passes_pixel(p(0, 0), p(10, 10), p(5, 5)));
        assert!(!passes_pixel(p(0, 0), p(10, 10), p(5, 4)));
        assert!(!passes_pixel(p(0, 0), p(10, 10), p(4, 5)));
        assert!(passes_pixel(p(0, 0), p(1000, 1), p(500, 1)));
        assert!(!passes_pixel(p(0, 0), p(1000, 1), p(500, 2)));
        assert!(!passes_pixel(p(0, 0), p(10, 0), p(5, 1)));
    }
}
