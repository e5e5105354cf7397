use crate::math::Coord;

use super::{Point, Polygon};

/// Axis-aligned rectangle, normalized so `left <= right` and `bottom <= top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: Coord,
    pub bottom: Coord,
    pub right: Coord,
    pub top: Coord,
}

impl Rect {
    /// Creates a rectangle from two opposite corners.
    #[must_use]
    pub fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Self {
            left: x1.min(x2),
            bottom: y1.min(y2),
            right: x1.max(x2),
            top: y1.max(y2),
        }
    }

    /// Smallest rectangle enclosing all points, or `None` for no points.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut r = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            r.left = r.left.min(p.x);
            r.bottom = r.bottom.min(p.y);
            r.right = r.right.max(p.x);
            r.top = r.top.max(p.y);
        }
        Some(r)
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        i64::from(self.top) - i64::from(self.bottom)
    }

    /// Returns `true` if the closed rectangles share at least one point.
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.bottom <= other.top
            && other.bottom <= self.top
    }

    /// Returns `true` if `p` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// Converts the rectangle into a clockwise polygon.
    #[must_use]
    pub fn to_polygon(&self) -> Polygon {
        Polygon::new([
            Point::new(self.left, self.bottom),
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
        ])
    }
}
