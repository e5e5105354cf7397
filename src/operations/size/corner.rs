use crate::geometry::Point;
use crate::math::{Vector2, TOLERANCE};

/// Margin added to the mode cutoff so exact right angles keep their miter.
const ANGLE_TOL: f64 = 1e-9;

/// Bending angle in degrees above which a corner is cut off, per sizing mode.
#[must_use]
pub fn cutoff_degrees(mode: u32) -> f64 {
    match mode {
        0 => 0.0,
        1 => 45.0,
        2 => 90.0,
        3 => 135.0,
        4 => 168.0,
        _ => 179.0,
    }
}

/// One contour edge after shifting.
#[derive(Debug, Clone, Copy)]
struct Shifted {
    /// Unit direction.
    dir: Vector2,
    /// Outward unit normal (left of the direction).
    normal: Vector2,
    /// Displacement applied to the edge.
    offset: Vector2,
}

impl Shifted {
    fn new(from: Point, to: Point, dx: f64, dy: f64) -> Option<Self> {
        let d = to.to_vector() - from.to_vector();
        let len = d.norm();
        if len < TOLERANCE {
            return None;
        }
        let dir = d / len;
        let normal = Vector2::new(-dir.y, dir.x);
        Some(Self {
            dir,
            normal,
            offset: Vector2::new(normal.x * dx, normal.y * dy),
        })
    }

    /// Signed offset distance along the normal.
    fn reach(&self) -> f64 {
        self.offset.dot(&self.normal)
    }
}

/// Builds the raw sized loop of one contour.
///
/// Every edge moves by `(nx * dx, ny * dy)` along its outward normal `n`.
/// Corners where the moved edges overlap are routed through the original
/// vertex; the resulting loops have negative wrap count and vanish in the
/// final positive merge. Other corners are extended to the miter point, or
/// cut off by a bevel when the bending angle exceeds the mode's cutoff.
///
/// The contour must be oriented with its inside on the right.
#[must_use]
pub fn sized_contour(contour: &[Point], dx: f64, dy: f64, mode: u32) -> Vec<Point> {
    let n = contour.len();
    let cutoff = cutoff_degrees(mode).to_radians();

    // Phase A: shift every edge
    let shifted: Vec<Shifted> = (0..n)
        .filter_map(|i| Shifted::new(contour[i], contour[(i + 1) % n], dx, dy))
        .collect();
    if shifted.len() < 2 {
        return Vec::new();
    }
    let starts: Vec<Vector2> = (0..n)
        .filter(|&i| contour[i] != contour[(i + 1) % n])
        .map(|i| contour[i].to_vector())
        .collect();

    // Phase B: join consecutive shifted edges at each original vertex
    let m = shifted.len();
    let mut raw: Vec<Vector2> = Vec::with_capacity(2 * m);
    for i in 0..m {
        let incoming = &shifted[(i + m - 1) % m];
        join_corner(starts[i], incoming, &shifted[i], dx, dy, cutoff, &mut raw);
    }

    let mut points: Vec<Point> = raw.into_iter().map(Point::snapped).collect();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn join_corner(
    p: Vector2,
    e1: &Shifted,
    e2: &Shifted,
    dx: f64,
    dy: f64,
    cutoff: f64,
    out: &mut Vec<Vector2>,
) {
    let q1 = p + e1.offset;
    let q2 = p + e2.offset;
    let turn = e1.dir.perp(&e2.dir);
    let along = e1.dir.dot(&e2.dir);

    if turn.abs() < TOLERANCE && along > 0.0 {
        out.push(q1);
        if (q2 - q1).norm() > TOLERANCE {
            out.push(q2);
        }
        return;
    }

    let reach = e1.reach() + e2.reach();
    if turn.abs() >= TOLERANCE && turn * reach > 0.0 {
        out.push(q1);
        out.push(p);
        out.push(q2);
        return;
    }

    let bend = turn.abs().atan2(along);
    let miter = (turn.abs() >= TOLERANCE).then(|| {
        let s = (e2.offset - e1.offset).perp(&e2.dir) / turn;
        (s, q1 + e1.dir * s)
    });

    if bend <= cutoff + ANGLE_TOL {
        if let Some((_, m)) = miter {
            out.push(m);
            return;
        }
    }

    // Bevel: cut perpendicular to the corner's bisector, at the distance an
    // edge with that normal would be moved.
    let bisector = e1.normal + e2.normal;
    let b = if bisector.norm() < TOLERANCE {
        e1.dir
    } else if reach < 0.0 {
        -bisector.normalize()
    } else {
        bisector.normalize()
    };
    let h = Vector2::new(b.x * dx, b.y * dy).norm();

    let s1 = (h - e1.offset.dot(&b)) / e1.dir.dot(&b);
    let s2 = (h - e2.offset.dot(&b)) / e2.dir.dot(&b);
    if let Some((s_miter, m)) = miter {
        if !s1.is_finite() || s1 >= s_miter {
            out.push(m);
            return;
        }
    }
    out.push(q1 + e1.dir * s1);
    out.push(q2 + e2.dir * s2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn box_hull() -> Vec<Point> {
        Rect::new(0, 0, 1000, 1000).to_polygon().hull().to_vec()
    }

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn cutoff_per_mode() {
        assert!(cutoff_degrees(0).abs() < f64::EPSILON);
        assert!((cutoff_degrees(2) - 90.0).abs() < f64::EPSILON);
        assert!((cutoff_degrees(7) - 179.0).abs() < f64::EPSILON);
    }

    #[test]
    fn right_angles_keep_miter_in_mode_2() {
        let grown = sized_contour(&box_hull(), 100.0, 100.0, 2);
        assert_eq!(grown, vec![p(-100, -100), p(-100, 1100), p(1100, 1100), p(1100, -100)]);
    }

    #[test]
    fn mode_0_bevels_right_angles() {
        let grown = sized_contour(&box_hull(), 100.0, 100.0, 0);
        assert_eq!(
            grown,
            vec![
                p(-41, -100),
                p(-100, -41),
                p(-100, 1041),
                p(-41, 1100),
                p(1041, 1100),
                p(1100, 1041),
                p(1100, -41),
                p(1041, -100),
            ]
        );
    }

    #[test]
    fn shrinking_routes_through_vertices() {
        let shrunk = sized_contour(&box_hull(), -100.0, -100.0, 2);
        assert_eq!(shrunk.len(), 12);
        assert_eq!(&shrunk[..3], &[p(0, 100), p(0, 0), p(100, 0)]);
    }

    #[test]
    fn anisotropic_widening() {
        let grown = sized_contour(&box_hull(), 100.0, 0.0, 0);
        assert_eq!(grown, vec![p(-100, 0), p(-100, 1000), p(1100, 1000), p(1100, 0)]);
    }
}
