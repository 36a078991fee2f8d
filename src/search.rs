//! Bookkeeping for the tree walks behind nearest-neighbor and region searches.

use crate::element::Element;
use crate::geometry::Aabb;
use crate::geometry::Point;

/// Best candidate found so far, along with the squared distance every other candidate must beat.
pub(crate) struct Nearest<'a, T> {
    pub target: Point,
    best_sq: f32,
    best: Option<&'a Element<T>>,

    /// Elements whose distance was computed.
    #[cfg(test)]
    pub scanned: usize,
}

impl<'a, T> Nearest<'a, T> {
    /// Start a search around `target` limited to `max_radius`. `None` if the radius can't bound
    /// anything (negative or NaN).
    pub fn new(target: Point, max_radius: f32) -> Option<Self> {
        if max_radius.is_nan() || max_radius < 0.0 {
            return None;
        }

        Some(Self {
            target,
            best_sq: max_radius * max_radius,
            best: None,
            #[cfg(test)]
            scanned: 0,
        })
    }

    /// Whether a node covering `bounds` could hold something closer than the current best.
    #[inline]
    pub fn worth_visiting(&self, bounds: &Aabb) -> bool {
        bounds.distance_squared(&self.target) < self.best_sq
    }

    /// Consider every element of a leaf.
    pub fn scan<F>(&mut self, elements: &'a [Element<T>], filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        #[cfg(test)]
        {
            self.scanned += elements.len();
        }

        for element in elements {
            let distance_sq = element.position.distance_squared(&self.target);

            if distance_sq < self.best_sq && filter(element) {
                self.best_sq = distance_sq;
                self.best = Some(element);
            }
        }
    }

    pub fn into_best(self) -> Option<&'a Element<T>> {
        self.best
    }
}

/// Elements collected so far by a region search.
pub(crate) struct Found<'a, T> {
    pub region: Aabb,
    elements: Vec<&'a Element<T>>,

    /// Nodes the search descended into.
    #[cfg(test)]
    pub visited: usize,

    /// Elements whose position was tested against the region.
    #[cfg(test)]
    pub position_checks: usize,
}

impl<'a, T> Found<'a, T> {
    pub fn new(region: Aabb) -> Self {
        Self {
            region,
            elements: Vec::new(),
            #[cfg(test)]
            visited: 0,
            #[cfg(test)]
            position_checks: 0,
        }
    }

    #[inline]
    pub fn visit(&mut self) {
        #[cfg(test)]
        {
            self.visited += 1;
        }
    }

    /// Keep the elements of a leaf that lie inside the region and pass `filter`.
    pub fn check<F>(&mut self, elements: &'a [Element<T>], filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        #[cfg(test)]
        {
            self.position_checks += elements.len();
        }

        let region = self.region;
        self.elements
            .extend(elements.iter().filter(|e| region.contains(&e.position) && filter(*e)));
    }

    /// Keep every element of a leaf the region swallows whole, as long as it passes `filter`.
    pub fn take_all<F>(&mut self, elements: &'a [Element<T>], filter: &mut F)
    where
        F: FnMut(&Element<T>) -> bool,
    {
        self.elements.extend(elements.iter().filter(|e| filter(*e)));
    }

    pub fn into_elements(self) -> Vec<&'a Element<T>> {
        self.elements
    }
}
