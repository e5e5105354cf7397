use crate::geometry::Point;

use super::intersect_2d::{cross, dot};

/// Computes twice the signed area of a closed contour (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area2(points: &[Point]) -> i128 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut sum = 0i128;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += i128::from(a.x) * i128::from(b.y) - i128::from(b.x) * i128::from(a.y);
    }
    sum
}

/// Rotates a closed contour so it starts at its smallest point (y-major order).
///
/// If the smallest point occurs more than once (self-touching contour), the
/// rotation with the lexicographically smallest point sequence wins. Ensures
/// deterministic output.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point]) -> Vec<Point> {
    let Some(&min) = points.iter().min() else {
        return Vec::new();
    };
    let n = points.len();
    let rotated = |start: usize| (0..n).map(move |k| points[(start + k) % n]);

    let mut best: Option<usize> = None;
    for (i, _) in points.iter().enumerate().filter(|(_, p)| **p == min) {
        best = match best {
            Some(b) if rotated(b).cmp(rotated(i)).is_le() => Some(b),
            _ => Some(i),
        };
    }

    match best {
        Some(0) | None => points.to_vec(),
        Some(b) => rotated(b).collect(),
    }
}

/// Removes consecutive duplicates and points where the contour runs straight on.
///
/// Reflecting points (spikes) are kept.
#[must_use]
pub fn compress(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() == Some(&p) {
            continue;
        }
        while out.len() >= 2 && runs_straight(out[out.len() - 2], out[out.len() - 1], p) {
            out.pop();
        }
        out.push(p);
    }

    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }

    // Wrap-around: the closing edge may continue the first or last edge.
    loop {
        let n = out.len();
        if n < 3 {
            break;
        }
        if runs_straight(out[n - 2], out[n - 1], out[0]) {
            out.pop();
        } else if runs_straight(out[n - 1], out[0], out[1]) {
            out.remove(0);
        } else {
            break;
        }
    }

    out
}

/// `true` if `b` lies strictly between `a` and `c` on a straight line.
fn runs_straight(a: Point, b: Point, c: Point) -> bool {
    cross(a, b, c) == 0 && dot(b, a, c) < 0
}

/// Winding number of a contour around a point given in doubled coordinates.
///
/// The point `(qx2 / 2, qy2 / 2)` must not lie on the contour. Counter-clockwise
/// contours give `+1` for interior points.
#[must_use]
pub fn winding_number_doubled(points: &[Point], qx2: i128, qy2: i128) -> i32 {
    let n = points.len();
    let mut wn = 0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let (ax, ay) = (2 * i128::from(a.x), 2 * i128::from(a.y));
        let (bx, by) = (2 * i128::from(b.x), 2 * i128::from(b.y));
        let side = (bx - ax) * (qy2 - ay) - (qx2 - ax) * (by - ay);
        if ay <= qy2 {
            if by > qy2 && side > 0 {
                wn += 1;
            }
        } else if by <= qy2 && side < 0 {
            wn -= 1;
        }
    }
    wn
}

/// Returns `true` if the midpoint of `a`-`b` lies inside the contour.
#[must_use]
pub fn contains_midpoint(points: &[Point], a: Point, b: Point) -> bool {
    let qx2 = i128::from(a.x) + i128::from(b.x);
    let qy2 = i128::from(a.y) + i128::from(b.y);
    winding_number_doubled(points, qx2, qy2) != 0
}
