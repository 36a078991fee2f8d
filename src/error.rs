use thiserror::Error;

use crate::geometry::Point;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadtreeError {
    #[error("Invalid tree bounds {min}..{max}, expected finite corners with min <= max")]
    InvalidBounds { min: Point, max: Point },

    #[error("Node capacity must be at least 1")]
    ZeroCapacity,

    #[error("Minimum node extent must be finite and non-negative, got {0}")]
    InvalidMinExtent(f32),
}
