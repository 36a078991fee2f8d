use core::fmt;
use core::mem;

use tracing::trace;

use crate::config::QuadtreeConfig;
use crate::element::Element;
use crate::geometry::Aabb;
use crate::geometry::Point;
use crate::outline;
use crate::search::Found;
use crate::search::Nearest;
use crate::zorder;

/// A node of a [`Quadtree`](super::Quadtree). Owns its four children outright, so dropping a node
/// drops the whole subtree under it.
#[derive(Debug)]
pub(crate) struct Node<T> {
    bounds: Aabb,
    depth: usize,
    kind: Kind<T>,
}

#[derive(Debug)]
enum Kind<T> {
    Leaf(Vec<Element<T>>),

    /// Children in Z-order, see [`zorder`]. The four are allocated and freed together.
    Branch(Box<[Node<T>; 4]>),
}

impl<T> Node<T> {
    pub fn leaf(bounds: Aabb, depth: usize) -> Self {
        Node {
            bounds,
            depth,
            kind: Kind::Leaf(Vec::new()),
        }
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn height(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 1,
            Kind::Branch(children) => 1 + children.iter().map(Node::height).max().unwrap_or(0),
        }
    }

    /// Number of elements in this subtree, computed by walking it.
    #[cfg(test)]
    pub fn count(&self) -> usize {
        match &self.kind {
            Kind::Leaf(elements) => elements.len(),
            Kind::Branch(children) => children.iter().map(Node::count).sum(),
        }
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 1,
            Kind::Branch(children) => 1 + children.iter().map(Node::node_count).sum::<usize>(),
        }
    }

    /// Store `element` in the leaf under this node that covers its position, splitting that leaf
    /// if it overflows. The caller guarantees the position is within `self.bounds`.
    pub fn insert(&mut self, element: Element<T>, config: &QuadtreeConfig) {
        debug_assert!(
            self.bounds.contains(&element.position),
            "{:?} routed to node {:?}",
            element.position,
            self.bounds
        );

        match &mut self.kind {
            Kind::Branch(children) => {
                let index = zorder::child_index(&self.bounds.center(), &element.position);
                children[index].insert(element, config);
            }
            Kind::Leaf(elements) => {
                elements.push(element);

                if elements.len() > config.node_capacity
                    && self.depth < config.max_depth
                    && zorder::can_halve(&self.bounds, config.min_extent)
                {
                    self.subdivide(config);
                }
            }
        }
    }

    /// Turn this leaf into a branch, handing every element down to the matching child.
    fn subdivide(&mut self, config: &QuadtreeConfig) {
        let Kind::Leaf(elements) = &mut self.kind else {
            return;
        };
        let elements = mem::take(elements);

        trace!(depth = self.depth, elements = elements.len(), bounds = ?self.bounds, "subdivide");

        let depth = self.depth + 1;
        let mut children = Box::new(self.bounds.split().map(|bounds| Node::leaf(bounds, depth)));

        let center = self.bounds.center();
        for element in elements {
            let index = zorder::child_index(&center, &element.position);
            children[index].insert(element, config);
        }

        self.kind = Kind::Branch(children);
    }

    /// Remove one element equal to `data` at `position` from this subtree, merging emptied
    /// branches on the way back up.
    pub fn remove(&mut self, data: &T, position: &Point, config: &QuadtreeConfig) -> bool
    where
        T: PartialEq,
    {
        debug_assert!(self.bounds.contains(position));

        match &mut self.kind {
            Kind::Leaf(elements) => {
                let Some(i) = elements.iter().position(|e| e.matches(data, position)) else {
                    return false;
                };

                elements.swap_remove(i);
                true
            }
            Kind::Branch(children) => {
                let index = zorder::child_index(&self.bounds.center(), position);

                if !children[index].remove(data, position, config) {
                    return false;
                }

                self.try_merge(config);
                true
            }
        }
    }

    /// Collapse a branch of four leaves back into a single leaf if their elements fit.
    fn try_merge(&mut self, config: &QuadtreeConfig) {
        let Kind::Branch(children) = &mut self.kind else {
            return;
        };

        let mut total = 0;
        for child in children.iter() {
            match &child.kind {
                Kind::Leaf(elements) => total += elements.len(),
                Kind::Branch(_) => return,
            }
        }

        if total > config.node_capacity {
            return;
        }

        let mut merged = Vec::with_capacity(total);
        for child in children.iter_mut() {
            if let Kind::Leaf(elements) = &mut child.kind {
                merged.append(elements);
            }
        }

        trace!(depth = self.depth, elements = total, bounds = ?self.bounds, "merge");

        self.kind = Kind::Leaf(merged);
    }

    pub fn find_nearest<'a, F>(&'a self, nearest: &mut Nearest<'a, T>, filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        match &self.kind {
            Kind::Leaf(elements) => nearest.scan(elements, filter),
            Kind::Branch(children) => {
                for index in zorder::nearest_order(&self.bounds.center(), &nearest.target) {
                    let child = &children[index];

                    if nearest.worth_visiting(&child.bounds) {
                        child.find_nearest(nearest, filter);
                    }
                }
            }
        }
    }

    /// Collect the elements of this subtree inside `found.region`. The caller guarantees the
    /// region intersects `self.bounds`.
    pub fn query<'a, F>(&'a self, found: &mut Found<'a, T>, filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        found.visit();

        if found.region.contains_aabb(&self.bounds) {
            self.gather(found, filter);
            return;
        }

        match &self.kind {
            Kind::Leaf(elements) => found.check(elements, filter),
            Kind::Branch(children) => {
                for child in children.iter() {
                    if child.bounds.intersects(&found.region) {
                        child.query(found, filter);
                    }
                }
            }
        }
    }

    /// Collect every element of this subtree without looking at positions.
    fn gather<'a, F>(&'a self, found: &mut Found<'a, T>, filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        match &self.kind {
            Kind::Leaf(elements) => found.take_all(elements, filter),
            Kind::Branch(children) => {
                for child in children.iter() {
                    child.gather(found, filter);
                }
            }
        }
    }

    pub fn write_outline(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Leaf(elements) => outline::write_leaf(f, self.depth, &self.bounds, elements),
            Kind::Branch(children) => {
                outline::write_branch(f, self.depth, &self.bounds)?;

                for child in children.iter() {
                    child.write_outline(f)?;
                }

                Ok(())
            }
        }
    }
}
