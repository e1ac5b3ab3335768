//! Geometry primitives
//!
//! Integer points, rectangles and their boundary edges, plus the two spatial
//! tests the rest of the generator is built on: edge projection and
//! edge-sharing between rectangles.

mod direction;
mod edge;
mod point;
mod rect;

pub use direction::Direction;
pub use edge::{Edge, project};
pub use point::Point;
pub use rect::Rect;
