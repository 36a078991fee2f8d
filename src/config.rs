use crate::error::QuadtreeError;
use crate::geometry::Aabb;

pub const DEFAULT_NODE_CAPACITY: usize = 8;
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Tuning knobs of a tree. Fixed for the lifetime of the tree once it's built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadtreeConfig {
    /// Number of elements a leaf holds before it tries to subdivide.
    pub node_capacity: usize,

    /// Depth past which nodes never subdivide. The root is at depth `0`, so a tree never gets
    /// taller than `max_depth + 1`.
    ///
    /// This also bounds the recursion depth of every operation.
    pub max_depth: usize,

    /// A node only subdivides if its children would be wider and taller than this.
    pub min_extent: f32,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            node_capacity: DEFAULT_NODE_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            min_extent: 0.0,
        }
    }
}

impl QuadtreeConfig {
    #[must_use]
    pub fn with_node_capacity(mut self, node_capacity: usize) -> Self {
        self.node_capacity = node_capacity;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_min_extent(mut self, min_extent: f32) -> Self {
        self.min_extent = min_extent;
        self
    }

    pub fn validate(&self) -> Result<(), QuadtreeError> {
        if self.node_capacity == 0 {
            return Err(QuadtreeError::ZeroCapacity);
        }

        if !self.min_extent.is_finite() || self.min_extent < 0.0 {
            return Err(QuadtreeError::InvalidMinExtent(self.min_extent));
        }

        Ok(())
    }
}

/// Checks the bounds a tree is created with.
pub(crate) fn validate_bounds(bounds: &Aabb) -> Result<(), QuadtreeError> {
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(QuadtreeError::InvalidBounds {
            min: bounds.min(),
            max: bounds.max(),
        })
    }
}
