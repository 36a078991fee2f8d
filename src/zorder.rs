//! Quadrant indexing shared by both node storages.
//!
//! A position is mapped to one of the four children of a node by comparing it against the node's
//! center:
//!
//! ```notrust
//!  y
//!  ^  +-----+-----+
//!  |  |  0  |  1  |
//!  |  +-----c-----+
//!  |  |  2  |  3  |
//!  |  +-----+-----+
//!  +-----------------> x
//! ```
//!
//! Bit 0 is set when `x >= c.x`, bit 1 is set when `y < c.y`. A point lying exactly on a dividing
//! line therefore belongs to the right and/or top quadrant. Insertion, removal, subdivision and the
//! nearest-neighbor visiting order all go through this module.

use crate::geometry::Aabb;
use crate::geometry::Point;

const RIGHT: usize = 0b01;
const BOTTOM: usize = 0b10;

/// Index of the child of a node centered at `center` that covers `p`.
#[inline]
pub fn child_index(center: &Point, p: &Point) -> usize {
    let mut index = 0;

    if p.x >= center.x {
        index |= RIGHT;
    }

    if p.y < center.y {
        index |= BOTTOM;
    }

    index
}

/// Order in which to visit the children of a node centered at `center` when looking for the
/// element closest to `target`: the quadrant holding the target, its horizontal neighbor, its
/// vertical neighbor, then the diagonally opposite quadrant.
#[inline]
pub fn nearest_order(center: &Point, target: &Point) -> [usize; 4] {
    let own = child_index(center, target);

    [own, own ^ RIGHT, own ^ BOTTOM, own ^ RIGHT ^ BOTTOM]
}

/// Whether halving `bounds` still produces children with a real extent.
///
/// Both half-extents must be larger than `min_extent`, and the center must land strictly inside the
/// box. The second check catches boxes so thin that halving them rounds back onto an edge.
pub fn can_halve(bounds: &Aabb, min_extent: f32) -> bool {
    let (min, max) = (bounds.min(), bounds.max());
    let center = bounds.center();

    bounds.width() / 2.0 > min_extent
        && bounds.height() / 2.0 > min_extent
        && min.x < center.x
        && center.x < max.x
        && min.y < center.y
        && center.y < max.y
}
