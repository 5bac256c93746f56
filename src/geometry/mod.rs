//! Planar geometry primitives shared by the mesh builder and the pathfinder.

mod key;
mod point;
mod polygon;
mod portal;
mod priority_queue;
mod rect;

pub use key::F64Key;
pub use point::{cross, Point, EPSILON};
pub use polygon::{segments_intersect, signed_area, CorridorId, Polygon};
pub use portal::Portal;
pub use priority_queue::PriorityQueue;
pub use rect::Rect;
