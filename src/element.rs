use crate::geometry::Point;

/// An item stored in a tree: a caller supplied payload pinned to a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<T> {
    pub data: T,
    pub position: Point,
}

impl<T> Element<T> {
    pub const fn new(data: T, position: Point) -> Self {
        Self { data, position }
    }

    /// Whether this element is the `(data, position)` pair a removal asks for.
    pub(crate) fn matches(&self, data: &T, position: &Point) -> bool
    where
        T: PartialEq,
    {
        self.data == *data && self.position == *position
    }
}
