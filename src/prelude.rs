//! Everything needed to build and query a tree.
//!
//! ```
//! use quadtree::prelude::*;
//! ```

pub use crate::QuadtreeConfig;
pub use crate::element::Element;
pub use crate::geometry::Aabb;
pub use crate::geometry::Point;
pub use crate::index::SpatialIndex;
pub use crate::linear::LinearQuadtree;
pub use crate::quadtree::Quadtree;
