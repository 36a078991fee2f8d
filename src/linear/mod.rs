//! Quadtree whose nodes all live in a single arena, addressed by index.
//!
//! Compared to [`Quadtree`](crate::Quadtree), splitting and merging don't hit the allocator once
//! the arena has grown to its working size: merged nodes go back to a free list and are handed out
//! again by the next split.

use core::fmt;
use core::mem;

use tracing::debug;
use tracing::trace;

use crate::config::QuadtreeConfig;
use crate::config::validate_bounds;
use crate::element::Element;
use crate::error::QuadtreeError;
use crate::geometry::Aabb;
use crate::geometry::Point;
use crate::index::SpatialIndex;
use crate::linear::arena::Arena;
use crate::linear::arena::NodeId;
use crate::linear::arena::NodeRecord;
use crate::linear::arena::ROOT;
use crate::outline;
use crate::search::Found;
use crate::search::Nearest;
use crate::zorder;

mod arena;

/// A point quadtree over a fixed region, backed by an arena of nodes.
///
/// Behaves exactly like [`Quadtree`](crate::Quadtree); see [`SpatialIndex`] for the operations.
#[derive(Debug)]
pub struct LinearQuadtree<T> {
    nodes: Arena<T>,
    config: QuadtreeConfig,
    len: usize,
}

impl<T> LinearQuadtree<T> {
    /// Create an empty tree covering `bounds` with the default [`QuadtreeConfig`].
    pub fn new(bounds: Aabb) -> Result<Self, QuadtreeError> {
        Self::with_config(bounds, QuadtreeConfig::default())
    }

    pub fn with_config(bounds: Aabb, config: QuadtreeConfig) -> Result<Self, QuadtreeError> {
        validate_bounds(&bounds)?;
        config.validate()?;

        Ok(LinearQuadtree {
            nodes: Arena::with_root(bounds),
            config,
            len: 0,
        })
    }

    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.live()
    }

    /// Number of node slots the arena holds, live or free.
    pub fn node_slots(&self) -> usize {
        self.nodes.slots()
    }

    fn node_height(&self, id: NodeId) -> usize {
        match self.nodes[id].children {
            None => 1,
            Some(children) => 1 + children.iter().map(|&c| self.node_height(c)).max().unwrap_or(0),
        }
    }

    #[cfg(test)]
    fn node_count_elements(&self, id: NodeId) -> usize {
        let node = &self.nodes[id];

        match node.children {
            None => node.elements.len(),
            Some(children) => children.iter().map(|&c| self.node_count_elements(c)).sum(),
        }
    }

    /// Store `element` in the leaf under `id` that covers its position, splitting that leaf if it
    /// overflows.
    fn insert_from(&mut self, mut id: NodeId, element: Element<T>) {
        while let Some(children) = self.nodes[id].children {
            let node = &self.nodes[id];
            debug_assert!(node.bounds.contains(&element.position));

            id = children[zorder::child_index(&node.bounds.center(), &element.position)];
        }

        let config = &self.config;
        let node = &mut self.nodes[id];
        debug_assert!(node.bounds.contains(&element.position));

        node.elements.push(element);

        if node.elements.len() > config.node_capacity
            && node.depth < config.max_depth
            && zorder::can_halve(&node.bounds, config.min_extent)
        {
            self.subdivide(id);
        }
    }

    /// Turn leaf `id` into a branch, handing every element down to the matching child.
    fn subdivide(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        let elements = mem::take(&mut node.elements);
        let (bounds, depth) = (node.bounds, node.depth);

        trace!(node = id, depth, elements = elements.len(), ?bounds, "subdivide");

        let children = bounds
            .split()
            .map(|quadrant| self.nodes.alloc(NodeRecord::leaf(quadrant, depth + 1)));
        self.nodes[id].children = Some(children);

        let center = bounds.center();
        for element in elements {
            let child = children[zorder::child_index(&center, &element.position)];
            self.insert_from(child, element);
        }
    }

    fn remove_from(&mut self, id: NodeId, data: &T, position: &Point) -> bool
    where
        T: PartialEq,
    {
        let node = &mut self.nodes[id];
        debug_assert!(node.bounds.contains(position));

        let Some(children) = node.children else {
            let Some(i) = node.elements.iter().position(|e| e.matches(data, position)) else {
                return false;
            };

            node.elements.swap_remove(i);
            return true;
        };

        let child = children[zorder::child_index(&node.bounds.center(), position)];
        if !self.remove_from(child, data, position) {
            return false;
        }

        self.try_merge(id);
        true
    }

    /// Collapse branch `id` back into a leaf if its four children are leaves whose elements fit
    /// into one. The children's slots go back to the free list.
    fn try_merge(&mut self, id: NodeId) {
        let Some(children) = self.nodes[id].children else {
            return;
        };

        let mut total = 0;
        for &child in &children {
            let child = &self.nodes[child];

            if !child.is_leaf() {
                return;
            }

            total += child.elements.len();
        }

        if total > self.config.node_capacity {
            return;
        }

        let mut merged = Vec::with_capacity(total);
        for child in children {
            merged.append(&mut self.nodes.free(child).elements);
        }

        let node = &mut self.nodes[id];
        trace!(node = id, depth = node.depth, elements = total, bounds = ?node.bounds, "merge");

        node.elements = merged;
        node.children = None;
    }

    fn find_nearest_from<'a, F>(&'a self, id: NodeId, nearest: &mut Nearest<'a, T>, filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        let node = &self.nodes[id];

        let Some(children) = node.children else {
            nearest.scan(&node.elements, filter);
            return;
        };

        for index in zorder::nearest_order(&node.bounds.center(), &nearest.target) {
            let child = children[index];

            if nearest.worth_visiting(&self.nodes[child].bounds) {
                self.find_nearest_from(child, nearest, filter);
            }
        }
    }

    fn query_from<'a, F>(&'a self, id: NodeId, found: &mut Found<'a, T>, filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        let node = &self.nodes[id];
        found.visit();

        if found.region.contains_aabb(&node.bounds) {
            self.gather_from(id, found, filter);
            return;
        }

        let Some(children) = node.children else {
            found.check(&node.elements, filter);
            return;
        };

        for child in children {
            if self.nodes[child].bounds.intersects(&found.region) {
                self.query_from(child, found, filter);
            }
        }
    }

    fn gather_from<'a, F>(&'a self, id: NodeId, found: &mut Found<'a, T>, filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        let node = &self.nodes[id];

        match node.children {
            None => found.take_all(&node.elements, filter),
            Some(children) => {
                for child in children {
                    self.gather_from(child, found, filter);
                }
            }
        }
    }

    fn write_outline_from(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[id];

        match node.children {
            None => outline::write_leaf(f, node.depth, &node.bounds, &node.elements),
            Some(children) => {
                outline::write_branch(f, node.depth, &node.bounds)?;

                for child in children {
                    self.write_outline_from(child, f)?;
                }

                Ok(())
            }
        }
    }
}

impl<T> SpatialIndex<T> for LinearQuadtree<T> {
    fn bounds(&self) -> &Aabb {
        &self.nodes[ROOT].bounds
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        self.node_height(ROOT)
    }

    fn insert(&mut self, data: T, position: Point) -> bool {
        if !self.bounds().contains(&position) {
            debug!(?position, bounds = ?self.bounds(), "insert out of bounds");
            return false;
        }

        self.insert_from(ROOT, Element::new(data, position));
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

        if !self.remove_from(ROOT, data, &position) {
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
        self.find_nearest_from(ROOT, &mut nearest, &mut filter);

        nearest.into_best()
    }

    fn query_by<F>(&self, region: &Aabb, mut filter: F) -> Vec<&Element<T>>
    where
        F: FnMut(&Element<T>) -> bool,
    {
        let mut found = Found::new(*region);

        if self.bounds().intersects(region) {
            self.query_from(ROOT, &mut found, &mut filter);
        }

        found.into_elements()
    }

    fn clear(&mut self) {
        self.nodes.reset();
        self.len = 0;
    }
}

impl<T> fmt::Display for LinearQuadtree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline_from(ROOT, f)
    }
}
