use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;
use crate::math::intersect_2d::point_on_segment;

use super::{Point, Rect};

/// A directed segment from `p1` to `p2`.
///
/// Direction carries meaning: for closed edge sets the inside lies on the
/// right-hand side of each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub p1: Point,
    pub p2: Point,
}

impl Edge {
    /// Creates a new edge.
    #[must_use]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Horizontal extent `p2.x - p1.x`.
    #[must_use]
    pub fn dx(&self) -> i64 {
        i64::from(self.p2.x) - i64::from(self.p1.x)
    }

    /// Vertical extent `p2.y - p1.y`.
    #[must_use]
    pub fn dy(&self) -> i64 {
        i64::from(self.p2.y) - i64::from(self.p1.y)
    }

    /// Returns `true` if both endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    /// Returns `true` for edges parallel to the x axis.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    /// Returns `true` for edges parallel to the y axis.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    /// Returns the edge with swapped direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// The smaller endpoint in y-major order.
    #[must_use]
    pub fn low(&self) -> Point {
        self.p1.min(self.p2)
    }

    /// The larger endpoint in y-major order.
    #[must_use]
    pub fn high(&self) -> Point {
        self.p1.max(self.p2)
    }

    /// Bounding box of the edge.
    #[must_use]
    pub fn bbox(&self) -> Rect {
        Rect::new(self.p1.x, self.p1.y, self.p2.x, self.p2.y)
    }

    /// Euclidean length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn length(&self) -> f64 {
        (self.dx() as f64).hypot(self.dy() as f64)
    }

    /// Returns `true` if `p` lies on the edge, endpoints included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        point_on_segment(p, self.p1, self.p2)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{})", self.p1, self.p2)
    }
}

impl FromStr for Edge {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .ok_or_else(|| GeometryError::parse("edge", s, "expected `(x1,y1;x2,y2)`"))?;
        let (a, b) = inner
            .split_once(';')
            .ok_or_else(|| GeometryError::parse("edge", s, "expected two points"))?;
        Ok(Self::new(a.parse()?, b.parse()?))
    }
}
