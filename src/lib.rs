//! Point quadtrees: store data at positions in the plane and ask what is near a point or inside a
//! box without scanning everything.
//!
//! Two trees with the same behavior are provided, differing only in how nodes are stored:
//!
//! * [`Quadtree`] gives every node its own allocation, each node owning its four children.
//! * [`LinearQuadtree`] keeps every node in one arena and recycles the slots of merged nodes.
//!
//! Both implement [`SpatialIndex`], which carries the whole API.
//!
//! ```
//! use quadtree::prelude::*;
//!
//! let bounds = Aabb::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
//! let mut tree = LinearQuadtree::new(bounds).unwrap();
//!
//! tree.insert("a", Point::new(25.0, 25.0));
//! tree.insert("b", Point::new(68.0, 68.0));
//!
//! let nearest = tree.find_nearest(Point::new(75.0, 75.0)).unwrap();
//! assert_eq!(nearest.data, "b");
//!
//! let region = Aabb::new(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
//! assert_eq!(tree.query(&region).len(), 1);
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod geometry;
pub mod index;
pub mod linear;
pub mod prelude;
pub mod quadtree;

mod outline;
mod search;
mod zorder;

pub use config::QuadtreeConfig;
pub use element::Element;
pub use error::QuadtreeError;
pub use index::SpatialIndex;
pub use linear::LinearQuadtree;
pub use quadtree::Quadtree;
