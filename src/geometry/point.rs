use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::ops::Add;
use core::ops::Mul;
use core::ops::Sub;

/// A position in the plane.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Compute the midpoint of the current `Point` and some `other` `Point`.
    pub fn mid(&self, other: &Self) -> Self {
        Point {
            x: (self.x + other.x) / 2f32,
            y: (self.y + other.y) / 2f32,
        }
    }

    /// Squared euclidean distance to `other`. Avoids the square root, which is all the tree ever
    /// needs for comparisons.
    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;

        dx * dx + dy * dy
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Self::Output {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}
