use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;

use crate::geometry::point::Point;

/// Axis-Aligned Bounding Box. All predicates treat the edges as part of the box.
#[derive(Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point,
    max: Point,
}

impl Aabb {
    /// Create a box spanning `min..max`. The caller is expected to pass `min <= max` on both
    /// axes, see [`Aabb::is_valid`].
    pub const fn new(min: Point, max: Point) -> Self {
        Aabb { min, max }
    }

    /// An inverted box that contains nothing. Growing it with [`Aabb::add`] yields the tight
    /// bounds of the added points.
    pub const fn empty() -> Self {
        Aabb {
            min: Point {
                x: f32::INFINITY,
                y: f32::INFINITY,
            },
            max: Point {
                x: f32::NEG_INFINITY,
                y: f32::NEG_INFINITY,
            },
        }
    }

    /// Create an AABB from a list of `Point`s.
    pub fn from_points(points: &[Point]) -> Self {
        let mut b = Aabb::empty();

        for p in points {
            b.add(p);
        }

        b
    }

    /// Add a `Point` `p` to the current Axis-Aligned Bounding Box.
    pub fn add(&mut self, p: &Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    /// Whether both corners are finite and `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.mid(&self.max)
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }

    /// Whether `other` lies entirely within this box.
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Squared distance from `p` to the closest point of the box, `0` when `p` is inside.
    pub fn distance_squared(&self, p: &Point) -> f32 {
        let dx = (self.min.x - p.x).max(0.0).max(p.x - self.max.x);
        let dy = (self.min.y - p.y).max(0.0).max(p.y - self.max.y);

        dx * dx + dy * dy
    }

    /// Splits the bounding box into four equal quadrants, in Z-order: top left, top right,
    /// bottom left, bottom right. `y` grows upwards.
    pub fn split(&self) -> [Aabb; 4] {
        let (min, max) = (self.min, self.max);
        let center = self.center();

        let top_left = Aabb::new(Point::new(min.x, center.y), Point::new(center.x, max.y));
        let top_right = Aabb::new(center, max);
        let bottom_left = Aabb::new(min, center);
        let bottom_right = Aabb::new(Point::new(center.x, min.y), Point::new(max.x, center.y));

        [top_left, top_right, bottom_left, bottom_right]
    }
}

impl Debug for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}..{:?}]", self.min, self.max)
    }
}

impl Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}
