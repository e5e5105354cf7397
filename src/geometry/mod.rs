pub mod edge;
pub mod point;
pub mod polygon;
pub mod rect;
pub mod text;

pub use edge::Edge;
pub use point::Point;
pub use polygon::Polygon;
pub use rect::Rect;
pub use text::{parse_edges, parse_polygons, to_text};
