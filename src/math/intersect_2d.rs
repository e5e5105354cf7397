use crate::geometry::Point;

use super::{Coord, Frac};

/// Cross product `(a - o) x (b - o)`, exact.
///
/// Positive when `o -> a -> b` turns counter-clockwise.
#[must_use]
pub fn cross(o: Point, a: Point, b: Point) -> i128 {
    let ax = i128::from(a.x) - i128::from(o.x);
    let ay = i128::from(a.y) - i128::from(o.y);
    let bx = i128::from(b.x) - i128::from(o.x);
    let by = i128::from(b.y) - i128::from(o.y);
    ax * by - ay * bx
}

/// Dot product `(a - o) . (b - o)`, exact.
#[must_use]
pub fn dot(o: Point, a: Point, b: Point) -> i128 {
    let ax = i128::from(a.x) - i128::from(o.x);
    let ay = i128::from(a.y) - i128::from(o.y);
    let bx = i128::from(b.x) - i128::from(o.x);
    let by = i128::from(b.y) - i128::from(o.y);
    ax * bx + ay * by
}

/// Returns `true` if `p` lies on the closed segment `a`-`b`.
#[must_use]
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    cross(a, b, p) == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// Returns `true` if `p` lies strictly between the endpoints of segment `a`-`b`.
#[must_use]
pub fn point_inside_segment(p: Point, a: Point, b: Point) -> bool {
    p != a && p != b && point_on_segment(p, a, b)
}

/// Crossing of segments `a`-`b` and `c`-`d`, rounded to the grid with
/// [`Frac::round`].
///
/// Returns `None` for parallel segments and for segments that do not meet.
/// Touching at an endpoint counts as a crossing.
#[must_use]
pub fn segment_crossing(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let d1x = i128::from(b.x) - i128::from(a.x);
    let d1y = i128::from(b.y) - i128::from(a.y);
    let d2x = i128::from(d.x) - i128::from(c.x);
    let d2y = i128::from(d.y) - i128::from(c.y);

    let mut den = d1x * d2y - d1y * d2x;
    if den == 0 {
        return None;
    }

    let ex = i128::from(c.x) - i128::from(a.x);
    let ey = i128::from(c.y) - i128::from(a.y);
    let mut t_num = ex * d2y - ey * d2x;
    let mut u_num = ex * d1y - ey * d1x;
    if den < 0 {
        den = -den;
        t_num = -t_num;
        u_num = -u_num;
    }

    if t_num < 0 || t_num > den || u_num < 0 || u_num > den {
        return None;
    }

    let x = Frac::new(i128::from(a.x) * den + d1x * t_num, den).round();
    let y = Frac::new(i128::from(a.y) * den + d1y * t_num, den).round();
    Some(Point::new(clamp_coord(x), clamp_coord(y)))
}

/// The x coordinate of the non-horizontal segment `lo`-`hi` at height `y`.
#[must_use]
pub fn x_at_y(lo: Point, hi: Point, y: Frac) -> Frac {
    // x = lo.x + (hi.x - lo.x) * (y - lo.y) / (hi.y - lo.y), with y = yn / yd
    let (yn, yd) = y.parts();
    let dy = i128::from(hi.y) - i128::from(lo.y);
    let dx = i128::from(hi.x) - i128::from(lo.x);
    let num = i128::from(lo.x) * dy * yd + dx * (yn - i128::from(lo.y) * yd);
    Frac::new(num, dy * yd)
}

/// The y coordinate of the non-vertical segment `a`-`b` at abscissa `x`.
#[must_use]
pub fn y_at_x(a: Point, b: Point, x: Coord) -> Frac {
    let dx = i128::from(b.x) - i128::from(a.x);
    let dy = i128::from(b.y) - i128::from(a.y);
    let num = i128::from(a.y) * dx + dy * (i128::from(x) - i128::from(a.x));
    Frac::new(num, dx)
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn clamp_coord(v: i128) -> Coord {
    v.clamp(i128::from(Coord::MIN), i128::from(Coord::MAX)) as Coord
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: Coord, y: Coord) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn cross_sign_follows_turn_direction() {
        assert!(cross(p(0, 0), p(10, 0), p(10, 10)) > 0);
        assert!(cross(p(0, 0), p(10, 0), p(10, -10)) < 0);
        assert_eq!(cross(p(0, 0), p(10, 0), p(20, 0)), 0);
    }

    #[test]
    fn point_on_segment_checks_bounds() {
        assert!(point_on_segment(p(5, 5), p(0, 0), p(10, 10)));
        assert!(point_on_segment(p(0, 0), p(0, 0), p(10, 10)));
        assert!(!point_on_segment(p(11, 11), p(0, 0), p(10, 10)));
        assert!(!point_inside_segment(p(10, 10), p(0, 0), p(10, 10)));
    }

    #[test]
    fn crossing_of_diagonals() {
        let x = segment_crossing(p(0, 0), p(10, 10), p(0, 10), p(10, 0));
        assert_eq!(x, Some(p(5, 5)));
    }

    #[test]
    fn crossing_snaps_to_grid() {
        let x = segment_crossing(p(0, 0), p(3, 1), p(0, 1), p(3, 0));
        // exact crossing is (1.5, 0.5)
        assert_eq!(x, Some(p(2, 1)));
        // (-1.5, -0.5) rounds up as well
        let x = segment_crossing(p(0, 0), p(-3, -1), p(0, -1), p(-3, 0));
        assert_eq!(x, Some(p(-1, 0)));
    }

    #[test]
    fn disjoint_and_parallel_segments_do_not_cross() {
        assert_eq!(segment_crossing(p(0, 0), p(10, 0), p(0, 5), p(10, 5)), None);
        assert_eq!(segment_crossing(p(0, 0), p(4, 4), p(5, 0), p(10, -5)), None);
    }

    #[test]
    fn x_at_mid_height() {
        let x = x_at_y(p(0, 0), p(10, 20), Frac::from_int(5));
        assert_eq!(x, Frac::new(5, 2));
        let y = y_at_x(p(0, 0), p(10, 20), 5);
        assert_eq!(y, Frac::from_int(10));
    }
}
