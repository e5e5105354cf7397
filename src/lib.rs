pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod processor;
pub mod tessellation;
pub mod topology;

pub use error::{EdgeprocError, Result};
pub use geometry::{Edge, Point, Polygon, Rect};
pub use operations::{mode_and, mode_anotb, mode_bnota, mode_or, mode_xor, BooleanMode, WindingRule};
pub use processor::{EdgeProcessor, ProcessorParams};
