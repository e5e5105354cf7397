use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::geometry::{Edge, Point};
use crate::math::intersect_2d::x_at_y;
use crate::math::{Coord, Frac};

use super::wrap::{InsideTest, Tag, WrapCounts};
use super::TaggedEdge;

/// A unique undirected segment with its net per-tag contribution.
#[derive(Debug)]
struct Segment {
    lo: Point,
    hi: Point,
    contributions: Vec<(Tag, i32)>,
}

impl Segment {
    fn x_at(&self, y: Frac) -> Frac {
        x_at_y(self.lo, self.hi, y)
    }
}

/// Selects the boundary of the inside region from noded edges.
///
/// Noded edges must only meet at endpoints. The plane is cut into bands
/// between consecutive endpoint heights; within a band the active edges are
/// ordered left to right and the wrap counts are accumulated across them.
/// An edge is kept where the inside test differs on its two sides, directed
/// so that the inside lies on its right. Horizontal edges compare the states
/// of the bands below and above.
pub fn classify(fragments: &[TaggedEdge], test: &dyn InsideTest) -> Vec<Edge> {
    let (segments, horizontals) = group_segments(fragments);

    let mut levels: Vec<Coord> = segments
        .iter()
        .flat_map(|s| [s.lo.y, s.hi.y])
        .chain(horizontals.iter().map(|&(lo, _)| lo.y))
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut horizontals_at: BTreeMap<Coord, Vec<usize>> = BTreeMap::new();
    for (i, &(lo, _)) in horizontals.iter().enumerate() {
        horizontals_at.entry(lo.y).or_default().push(i);
    }
    let mut inside_below = vec![false; horizontals.len()];
    let mut inside_above = vec![false; horizontals.len()];

    let mut result = Vec::new();
    let mut active: Vec<usize> = Vec::new();
    let mut next = 0;

    for (k, &y0) in levels.iter().enumerate() {
        let Some(&y1) = levels.get(k + 1) else {
            break;
        };

        active.retain(|&s| segments[s].hi.y > y0);
        while next < segments.len() && segments[next].lo.y == y0 {
            active.push(next);
            next += 1;
        }

        let mid = Frac::new(i128::from(y0) + i128::from(y1), 2);
        active.sort_by(|&a, &b| order_at(&segments[a], &segments[b], mid));

        let mut wc = WrapCounts::new();
        for &s in &active {
            let seg = &segments[s];
            let before = test.is_inside(&wc);
            wc.apply(&seg.contributions);
            let after = test.is_inside(&wc);
            // Each segment is emitted once, from the band it starts in.
            if seg.lo.y == y0 && before != after {
                result.push(if after {
                    Edge::new(seg.lo, seg.hi)
                } else {
                    Edge::new(seg.hi, seg.lo)
                });
            }
        }

        if let Some(list) = horizontals_at.get(&y0) {
            for &h in list {
                inside_above[h] = test.is_inside(&state_left_of(
                    &segments,
                    &active,
                    y0,
                    horizontal_mid(horizontals[h]),
                ));
            }
        }
        if let Some(list) = horizontals_at.get(&y1) {
            for &h in list {
                inside_below[h] = test.is_inside(&state_left_of(
                    &segments,
                    &active,
                    y1,
                    horizontal_mid(horizontals[h]),
                ));
            }
        }
    }

    for (h, &(lo, hi)) in horizontals.iter().enumerate() {
        match (inside_below[h], inside_above[h]) {
            (true, false) => result.push(Edge::new(lo, hi)),
            (false, true) => result.push(Edge::new(hi, lo)),
            _ => {}
        }
    }

    result
}

/// Merges identical undirected fragments and sums their contributions.
///
/// Upward fragments add one to their tag, downward fragments subtract one.
/// Returns the non-horizontal segments sorted by their low point and the
/// horizontal ones as `(left, right)` pairs.
fn group_segments(fragments: &[TaggedEdge]) -> (Vec<Segment>, Vec<(Point, Point)>) {
    let mut grouped: BTreeMap<(Point, Point), BTreeMap<Tag, i32>> = BTreeMap::new();
    for f in fragments {
        let (lo, hi) = (f.edge.low(), f.edge.high());
        let entry = grouped.entry((lo, hi)).or_default();
        if !f.edge.is_horizontal() {
            let delta = if f.edge.p1 == lo { 1 } else { -1 };
            *entry.entry(f.tag).or_insert(0) += delta;
        }
    }

    let mut segments = Vec::new();
    let mut horizontals = Vec::new();
    for ((lo, hi), per_tag) in grouped {
        if lo.y == hi.y {
            horizontals.push((lo, hi));
        } else {
            segments.push(Segment {
                lo,
                hi,
                contributions: per_tag.into_iter().filter(|&(_, c)| c != 0).collect(),
            });
        }
    }
    (segments, horizontals)
}

fn order_at(a: &Segment, b: &Segment, y: Frac) -> Ordering {
    a.x_at(y)
        .cmp(&b.x_at(y))
        .then(a.lo.cmp(&b.lo))
        .then(a.hi.cmp(&b.hi))
}

fn horizontal_mid((lo, hi): (Point, Point)) -> Frac {
    Frac::new(i128::from(lo.x) + i128::from(hi.x), 2)
}

/// Wrap counts at `(x, y)` on the border of the current band.
fn state_left_of(segments: &[Segment], active: &[usize], y: Coord, x: Frac) -> WrapCounts {
    let y = Frac::from_int(i128::from(y));
    let mut wc = WrapCounts::new();
    for &s in active {
        if segments[s].x_at(y) < x {
            wc.apply(&segments[s].contributions);
        }
    }
    wc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Polygon, Rect};
    use crate::operations::sweep::{node_edges, WindingRule};

    fn tagged(poly: &Polygon, tag: Tag) -> Vec<TaggedEdge> {
        poly.edges().map(|e| TaggedEdge::new(e, tag)).collect()
    }

    fn sorted(mut edges: Vec<Edge>) -> Vec<Edge> {
        edges.sort_by_key(|e| (e.p1, e.p2));
        edges
    }

    #[test]
    fn single_box_is_its_own_boundary() {
        let poly = Rect::new(0, 0, 1000, 1000).to_polygon();
        let out = classify(&tagged(&poly, 0), &WindingRule::NonZero);
        assert_eq!(sorted(out), sorted(poly.edges().collect()));
    }

    #[test]
    fn counter_clockwise_box_is_flipped() {
        let ccw = Polygon::raw(vec![
            Point::new(0, 0),
            Point::new(1000, 0),
            Point::new(1000, 1000),
            Point::new(0, 1000),
        ]);
        let out = classify(&tagged(&ccw, 0), &WindingRule::NonZero);
        let expected = Rect::new(0, 0, 1000, 1000).to_polygon().edges().collect();
        assert_eq!(sorted(out), sorted(expected));
        assert!(classify(&tagged(&ccw, 0), &WindingRule::Positive).is_empty());
    }

    #[test]
    fn duplicate_box_cancels_under_even_odd() {
        let poly = Rect::new(0, 0, 10, 10).to_polygon();
        let mut input = tagged(&poly, 0);
        input.extend(tagged(&poly, 0));
        assert!(classify(&input, &WindingRule::EvenOdd).is_empty());
        assert_eq!(classify(&input, &WindingRule::NonZero).len(), 4);
    }

    #[test]
    fn abutting_boxes_drop_shared_edge() {
        let mut input = tagged(&Rect::new(0, 0, 100, 100).to_polygon(), 0);
        input.extend(tagged(&Rect::new(100, 0, 200, 100).to_polygon(), 0));
        let out = classify(&node_edges(&input), &WindingRule::NonZero);
        assert_eq!(out.len(), 6);
        assert!(!out.iter().any(|e| e.p1.x == 100 && e.p2.x == 100));
    }
}
