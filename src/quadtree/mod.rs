//! Quadtree whose nodes own their children directly.

use core::fmt;

use tracing::debug;

use crate::config::QuadtreeConfig;
use crate::config::validate_bounds;
use crate::element::Element;
use crate::error::QuadtreeError;
use crate::geometry::Aabb;
use crate::geometry::Point;
use crate::index::SpatialIndex;
use crate::quadtree::node::Node;
use crate::search::Found;
use crate::search::Nearest;

mod node;

/// A point quadtree over a fixed region, with every node allocated on its own.
///
/// Leaves hold up to `node_capacity` elements. Inserting past that splits the leaf into four
/// quadrants, unless it already sits at `max_depth` or is too small to halve, in which case it
/// simply keeps growing. Removing elements merges four sibling leaves back into their parent once
/// their elements fit into a single leaf again.
///
/// See [`SpatialIndex`] for the operations.
#[derive(Debug)]
pub struct Quadtree<T> {
    root: Node<T>,
    config: QuadtreeConfig,

    /// Number of stored elements, kept up to date by `insert` and `remove`
    len: usize,
}

impl<T> Quadtree<T> {
    /// Create an empty tree covering `bounds` with the default [`QuadtreeConfig`].
    pub fn new(bounds: Aabb) -> Result<Self, QuadtreeError> {
        Self::with_config(bounds, QuadtreeConfig::default())
    }

    pub fn with_config(bounds: Aabb, config: QuadtreeConfig) -> Result<Self, QuadtreeError> {
        validate_bounds(&bounds)?;
        config.validate()?;

        Ok(Quadtree {
            root: Node::leaf(bounds, 0),
            config,
            len: 0,
        })
    }

    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl<T> SpatialIndex<T> for Quadtree<T> {
    fn bounds(&self) -> &Aabb {
        self.root.bounds()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        self.root.height()
    }

    fn insert(&mut self, data: T, position: Point) -> bool {
        if !self.bounds().contains(&position) {
            debug!(?position, bounds = ?self.bounds(), "insert out of bounds");
            return false;
        }

        self.root.insert(Element::new(data, position), &self.config);
        self.len += 1;

        true
    }

    fn remove(&mut self, data: &T, position: Point) -> bool
    where
        T: PartialEq,
    {
        if !self.bounds().contains(&position) {
            debug!(?position, bounds = ?self.bounds(), "remove out of bounds");
            return false;
        }

        if !self.root.remove(data, &position, &self.config) {
            return false;
        }

        self.len -= 1;

        true
    }

    fn find_nearest_by<F>(&self, target: Point, max_radius: f32, mut filter: F) -> Option<&Element<T>>
    where
        F: FnMut(&Element<T>) -> bool,
    {
        if !self.bounds().contains(&target) {
            debug!(?target, bounds = ?self.bounds(), "nearest target out of bounds");
            return None;
        }

        let mut nearest = Nearest::new(target, max_radius)?;
        self.root.find_nearest(&mut nearest, &mut filter);

        nearest.into_best()
    }

    fn query_by<F>(&self, region: &Aabb, mut filter: F) -> Vec<&Element<T>>
    where
        F: FnMut(&Element<T>) -> bool,
    {
        let mut found = Found::new(*region);

        if self.bounds().intersects(region) {
            self.root.query(&mut found, &mut filter);
        }

        found.into_elements()
    }

    fn clear(&mut self) {
        self.root = Node::leaf(*self.root.bounds(), 0);
        self.len = 0;
    }
}

impl<T> fmt::Display for Quadtree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_outline(f)
    }
}
