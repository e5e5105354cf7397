pub mod frac;
pub mod intersect_2d;
pub mod polygon_2d;

pub use frac::Frac;

/// Integer grid coordinate.
pub type Coord = i32;

/// 2D vector type used for floating-point intermediates.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Snaps a floating-point coordinate to the grid, rounding half away from zero.
///
/// Values outside the coordinate range saturate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn snap(v: f64) -> Coord {
    v.round() as Coord
}
