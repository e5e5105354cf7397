use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;
use crate::math::{snap, Coord, Vector2};

/// A point on the integer layout grid.
///
/// Points order y-major: first by `y`, then by `x`. This is the scan
/// direction of the edge processor and defines where contours start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Converts physical coordinates (e.g. micrometers) to grid units.
    ///
    /// `dbu` is the physical size of one grid unit, e.g. `0.001`.
    #[must_use]
    pub fn from_micron(x: f64, y: f64, dbu: f64) -> Self {
        Self::new(snap(x / dbu), snap(y / dbu))
    }

    /// Converts grid units back to physical coordinates.
    #[must_use]
    pub fn to_micron(self, dbu: f64) -> (f64, f64) {
        (f64::from(self.x) * dbu, f64::from(self.y) * dbu)
    }

    /// Returns the point shifted by `(dx, dy)`.
    #[must_use]
    pub fn moved(self, dx: Coord, dy: Coord) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Returns the point as a floating-point vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Snaps a floating-point position to the grid.
    #[must_use]
    pub fn snapped(v: Vector2) -> Self {
        Self::new(snap(v.x), snap(v.y))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| GeometryError::parse("point", s, "expected `x,y`"))?;
        let coord = |v: &str| {
            v.trim()
                .parse::<Coord>()
                .map_err(|e| GeometryError::parse("point", s, e.to_string()))
        };
        Ok(Self::new(coord(x)?, coord(y)?))
    }
}
