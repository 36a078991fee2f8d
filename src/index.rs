use crate::element::Element;
use crate::geometry::Aabb;
use crate::geometry::Point;

/// The contract shared by [`Quadtree`](crate::Quadtree) and
/// [`LinearQuadtree`](crate::LinearQuadtree). The two only differ in how they store their nodes.
///
/// Positions outside of [`SpatialIndex::bounds`] are never stored: inserting or removing them
/// returns `false` and leaves the tree untouched.
pub trait SpatialIndex<T> {
    /// The region covered by the tree. Fixed at construction.
    fn bounds(&self) -> &Aabb;

    /// Number of stored elements.
    fn len(&self) -> usize;

    /// Height of the tree: `1` for a lone leaf, one more than the tallest child for a branch.
    fn height(&self) -> usize;

    /// Store `data` at `position`. Returns `false` if `position` is out of bounds.
    ///
    /// Identical `(data, position)` pairs may be stored more than once.
    fn insert(&mut self, data: T, position: Point) -> bool;

    /// Remove one element equal to `data` stored at exactly `position`. Returns `false` if
    /// `position` is out of bounds or no such element exists.
    fn remove(&mut self, data: &T, position: Point) -> bool
    where
        T: PartialEq;

    /// Closest element to `target` that is strictly closer than `max_radius` and passes `filter`.
    ///
    /// Returns `None` if `target` lies outside the tree, if `max_radius` is negative or NaN, or if
    /// nothing qualifies. Ties go to whichever element the search reaches first.
    fn find_nearest_by<F>(&self, target: Point, max_radius: f32, filter: F) -> Option<&Element<T>>
    where
        F: FnMut(&Element<T>) -> bool;

    /// Every element inside `region` (edges included) that passes `filter`, in no particular
    /// order.
    fn query_by<F>(&self, region: &Aabb, filter: F) -> Vec<&Element<T>>
    where
        F: FnMut(&Element<T>) -> bool;

    /// Drop every element and collapse the tree back into a single empty leaf.
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_nearest(&self, target: Point) -> Option<&Element<T>> {
        self.find_nearest_by(target, f32::INFINITY, |_| true)
    }

    fn query(&self, region: &Aabb) -> Vec<&Element<T>> {
        self.query_by(region, |_| true)
    }

    /// Every stored element, in no particular order.
    fn elements(&self) -> Vec<&Element<T>> {
        let bounds = *self.bounds();
        self.query(&bounds)
    }
}
