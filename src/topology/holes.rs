use crate::geometry::{Point, Polygon};
use crate::math::intersect_2d::{clamp_coord, y_at_x};
use crate::math::polygon_2d::{compress, contains_midpoint, rotate_to_canonical_start, signed_area2};
use crate::math::Frac;

use super::trace::ccw_angle;

/// Sorts traced contours into hulls and holes and builds polygons.
///
/// Clockwise contours are hulls, counter-clockwise ones are holes. Each hole
/// belongs to the smallest hull containing it. With `resolve_holes` the holes
/// are joined into their hull by cut lines and no polygon carries holes.
/// The result is sorted by point sequence.
pub fn assemble_polygons(contours: Vec<Vec<Point>>, resolve_holes: bool) -> Vec<Polygon> {
    let mut hulls: Vec<(Vec<Point>, i128)> = Vec::new();
    let mut holes: Vec<Vec<Point>> = Vec::new();
    for contour in contours {
        let area2 = signed_area2(&contour);
        match area2.signum() {
            -1 => hulls.push((contour, -area2)),
            1 => holes.push(contour),
            _ => tracing::trace!(points = contour.len(), "dropping zero-area contour"),
        }
    }

    let mut holes_of: Vec<Vec<Vec<Point>>> = vec![Vec::new(); hulls.len()];
    for hole in holes {
        if hole.len() < 2 {
            continue;
        }
        let owner = hulls
            .iter()
            .enumerate()
            .filter(|(_, (hull, _))| contains_midpoint(hull, hole[0], hole[1]))
            .min_by_key(|(_, (_, area))| *area)
            .map(|(i, _)| i);
        match owner {
            Some(i) => holes_of[i].push(normalize(&hole)),
            None => tracing::warn!(points = hole.len(), "hole outside of every hull"),
        }
    }

    let mut polygons: Vec<Polygon> = hulls
        .into_iter()
        .zip(holes_of)
        .map(|((hull, _), mut holes)| {
            let hull = normalize(&hull);
            holes.sort();
            if resolve_holes && !holes.is_empty() {
                Polygon::from_contours(join_holes(hull, holes), Vec::new())
            } else {
                Polygon::from_contours(hull, holes)
            }
        })
        .collect();

    polygons.sort_by(|a, b| a.hull().cmp(b.hull()).then_with(|| a.holes().cmp(b.holes())));
    polygons
}

fn normalize(contour: &[Point]) -> Vec<Point> {
    rotate_to_canonical_start(&compress(contour))
}

/// Splices every hole into the hull, lowest hole first.
fn join_holes(hull: Vec<Point>, holes: Vec<Vec<Point>>) -> Vec<Point> {
    let mut contour = hull;
    for hole in holes {
        contour = splice_hole(contour, &hole);
    }
    rotate_to_canonical_start(&contour)
}

/// Joins one hole into the contour.
///
/// A vertical ray is cast downwards from the hole's lowest point `p` to the
/// nearest point `q` of the contour; the contour then runs
/// `q, p, <hole>, p, q` at that position.
fn splice_hole(contour: Vec<Point>, hole: &[Point]) -> Vec<Point> {
    let p = hole[0];
    let n = contour.len();

    let mut best: Option<(Frac, usize)> = None;
    for i in 0..n {
        let (a, b) = (contour[i], contour[(i + 1) % n]);
        let hit = if a.x == b.x {
            if a.x != p.x || a.y.min(b.y) > p.y {
                continue;
            }
            Frac::from_int(i128::from(a.y.max(b.y).min(p.y)))
        } else {
            if p.x < a.x.min(b.x) || p.x > a.x.max(b.x) {
                continue;
            }
            let y = y_at_x(a, b, p.x);
            if y > Frac::from_int(i128::from(p.y)) {
                continue;
            }
            y
        };
        if best.is_none_or(|(y, _)| hit > y) {
            best = Some((hit, i));
        }
    }

    let Some((y, edge)) = best else {
        tracing::warn!(x = p.x, y = p.y, "no contour below hole");
        return contour;
    };
    let q = Point::new(p.x, clamp_coord(y.round()));

    // The cut enters the contour at a vertex or inside an edge.
    let toward = if q == p {
        hole.get(1).copied().unwrap_or(p)
    } else {
        p
    };
    let at = (0..n)
        .filter(|&j| contour[j] == q)
        .find(|&j| wedge_contains(contour[(j + n - 1) % n], q, contour[(j + 1) % n], toward))
        .or_else(|| (0..n).find(|&j| contour[j] == q));

    let mut insertion = Vec::with_capacity(hole.len() + 3);
    let split = match at {
        Some(j) => j,
        None => {
            insertion.push(q);
            edge
        }
    };
    insertion.extend_from_slice(hole);
    insertion.push(p);
    insertion.push(q);

    let mut result = Vec::with_capacity(n + insertion.len());
    result.extend_from_slice(&contour[..=split]);
    result.extend(insertion);
    result.extend_from_slice(&contour[split + 1..]);
    result.dedup();
    while result.len() > 1 && result.first() == result.last() {
        result.pop();
    }
    result
}

/// Returns `true` if the direction `vertex -> toward` lies strictly inside
/// the interior wedge at `vertex`, which is on the right of `prev -> vertex -> next`.
fn wedge_contains(prev: Point, vertex: Point, next: Point, toward: Point) -> bool {
    let dir = |p: Point| {
        (
            f64::from(p.x) - f64::from(vertex.x),
            f64::from(p.y) - f64::from(vertex.y),
        )
    };
    let (out, back, t) = (dir(next), dir(prev), dir(toward));
    // Clockwise angles from the outgoing direction.
    ccw_angle(t, out) < ccw_angle(back, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn frame_loops() -> Vec<Vec<Point>> {
        vec![
            vec![p(0, 0), p(0, 1000), p(1000, 1000), p(1000, 0)],
            vec![p(100, 100), p(900, 100), p(900, 900), p(100, 900)],
        ]
    }

    #[test]
    fn hole_is_assigned_to_enclosing_hull() {
        let polys = assemble_polygons(frame_loops(), false);
        assert_eq!(polys.len(), 1);
        assert_eq!(
            polys[0].to_string(),
            "(0,0;0,1000;1000,1000;1000,0)/(100,100;900,100;900,900;100,900)"
        );
    }

    #[test]
    fn resolved_hole_is_cut_into_hull() {
        let polys = assemble_polygons(frame_loops(), true);
        assert_eq!(polys.len(), 1);
        assert!(polys[0].holes().is_empty());
        assert_eq!(
            polys[0].to_string(),
            "(0,0;0,1000;1000,1000;1000,0;100,0;100,100;900,100;900,900;100,900;100,100;100,0)"
        );
        assert_eq!(polys[0].area2(), 2 * (1_000_000 - 640_000));
    }

    #[test]
    fn island_in_hole_stays_separate() {
        let mut loops = frame_loops();
        loops.push(vec![p(400, 400), p(400, 600), p(600, 600), p(600, 400)]);
        let polys = assemble_polygons(loops, false);
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].holes().len(), 1);
        assert_eq!(polys[1].to_string(), "(400,400;400,600;600,600;600,400)");
    }

    #[test]
    fn wedge_of_clockwise_corner() {
        // Lower left corner of a clockwise square: interior is the first quadrant.
        assert!(wedge_contains(p(10, 0), p(0, 0), p(0, 10), p(1, 1)));
        assert!(!wedge_contains(p(10, 0), p(0, 0), p(0, 10), p(-1, -1)));
    }
}
