//! Planar primitives the trees are built on.

mod aabb;
mod point;

pub use aabb::Aabb;
pub use point::Point;
