use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;
use crate::math::polygon_2d::{compress, rotate_to_canonical_start, signed_area2};
use crate::math::Coord;

use super::text::split_top_level;
use super::{Edge, Point, Rect};

/// A polygon: one hull plus zero or more holes.
///
/// Normalized polygons have a clockwise hull (inside on the right of every
/// edge) and counter-clockwise holes; every contour starts at its smallest
/// point in y-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Polygon {
    hull: Vec<Point>,
    holes: Vec<Vec<Point>>,
}

impl Polygon {
    /// Creates a normalized polygon from hull points.
    ///
    /// Duplicate and collinear points are removed and the hull is oriented
    /// clockwise. A hull with zero net area (e.g. two corner-touching boxes
    /// drawn as one contour) keeps its input orientation.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        let pts: Vec<Point> = points.into_iter().collect();
        Self {
            hull: normalize_contour(&pts, false),
            holes: Vec::new(),
        }
    }

    /// Creates a polygon from hull points without any normalization.
    #[must_use]
    pub fn raw(points: Vec<Point>) -> Self {
        Self {
            hull: points,
            holes: Vec::new(),
        }
    }

    /// Assembles a polygon from contours that are already normalized.
    pub(crate) fn from_contours(hull: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self { hull, holes }
    }

    /// Adds a hole, normalized counter-clockwise.
    pub fn insert_hole(&mut self, points: impl IntoIterator<Item = Point>) {
        let pts: Vec<Point> = points.into_iter().collect();
        self.holes.push(normalize_contour(&pts, true));
    }

    /// Builder form of [`Polygon::insert_hole`].
    #[must_use]
    pub fn with_hole(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.insert_hole(points);
        self
    }

    #[must_use]
    pub fn hull(&self) -> &[Point] {
        &self.hull
    }

    #[must_use]
    pub fn holes(&self) -> &[Vec<Point>] {
        &self.holes
    }

    /// Iterates the hull followed by all holes.
    pub fn contours(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self.hull.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// All edges, hull first, each contour closed.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.contours().flat_map(|c| {
            let n = c.len();
            (0..n).map(move |i| Edge::new(c[i], c[(i + 1) % n]))
        })
    }

    /// Total number of points over all contours.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.contours().map(<[Point]>::len).sum()
    }

    /// Twice the enclosed area: hull area minus hole areas.
    #[must_use]
    pub fn area2(&self) -> i128 {
        let hull = signed_area2(&self.hull).abs();
        let holes: i128 = self.holes.iter().map(|h| signed_area2(h).abs()).sum();
        hull - holes
    }

    /// Enclosed area.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn area(&self) -> f64 {
        self.area2() as f64 * 0.5
    }

    /// Sum of all edge lengths.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|e| e.length()).sum()
    }

    /// Bounding box of the hull; the default rectangle for an empty polygon.
    #[must_use]
    pub fn bbox(&self) -> Rect {
        Rect::from_points(&self.hull).unwrap_or_default()
    }

    /// Returns `true` if the polygon is an axis-aligned rectangle without holes.
    #[must_use]
    pub fn is_box(&self) -> bool {
        if !self.holes.is_empty() || self.hull.len() != 4 {
            return false;
        }
        let n = self.hull.len();
        (0..n).all(|i| {
            let e = Edge::new(self.hull[i], self.hull[(i + 1) % n]);
            e.is_horizontal() != e.is_vertical()
        })
    }

    /// Returns the polygon shifted by `(dx, dy)`.
    #[must_use]
    pub fn moved(&self, dx: Coord, dy: Coord) -> Self {
        let shift = |c: &Vec<Point>| -> Vec<Point> {
            c.iter().map(|p| p.moved(dx, dy)).collect()
        };
        Self {
            hull: shift(&self.hull),
            holes: self.holes.iter().map(shift).collect(),
        }
    }
}

impl From<Rect> for Polygon {
    fn from(r: Rect) -> Self {
        r.to_polygon()
    }
}

/// Compresses a contour, orients it and rotates it to its canonical start.
fn normalize_contour(points: &[Point], counter_clockwise: bool) -> Vec<Point> {
    let mut pts = compress(points);
    let area = signed_area2(&pts);
    if (counter_clockwise && area < 0) || (!counter_clockwise && area > 0) {
        pts.reverse();
    }
    rotate_to_canonical_start(&pts)
}

fn write_contour(f: &mut fmt::Formatter<'_>, contour: &[Point]) -> fmt::Result {
    f.write_str("(")?;
    for (i, p) in contour.iter().enumerate() {
        if i > 0 {
            f.write_str(";")?;
        }
        write!(f, "{p}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_contour(f, &self.hull)?;
        for hole in &self.holes {
            f.write_str("/")?;
            write_contour(f, hole)?;
        }
        Ok(())
    }
}

impl FromStr for Polygon {
    type Err = GeometryError;

    /// Parses `(hull)/(hole)/...` keeping the points exactly as written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut contours = split_top_level(s, '/').into_iter().map(|part| {
            let inner = part
                .trim()
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .ok_or_else(|| GeometryError::parse("polygon", s, "expected `(x,y;...)`"))?;
            if inner.trim().is_empty() {
                return Ok(Vec::new());
            }
            inner
                .split(';')
                .map(str::parse)
                .collect::<Result<Vec<Point>, _>>()
        });

        let hull = contours
            .next()
            .ok_or_else(|| GeometryError::parse("polygon", s, "empty input"))??;
        let holes = contours.collect::<Result<Vec<_>, _>>()?;
        Ok(Self { hull, holes })
    }
}
