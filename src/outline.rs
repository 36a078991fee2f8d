//! Text outline of a tree's node layout, shared by the `Display` impls of both storages.
//!
//! ```notrust
//! branch [(0, 0)..(100, 100)]
//!   leaf [(0, 50)..(50, 100)]
//!   leaf [(50, 50)..(100, 100)] (87, 87)
//!   leaf [(0, 0)..(50, 50)] (25, 25)
//!   leaf [(50, 0)..(100, 50)]
//! ```
//!
//! Children are listed in Z-order, leaves list the positions they hold in storage order.

use core::fmt;

use crate::element::Element;
use crate::geometry::Aabb;

const INDENT: usize = 2;

pub(crate) fn write_branch(f: &mut fmt::Formatter<'_>, depth: usize, bounds: &Aabb) -> fmt::Result {
    writeln!(f, "{:pad$}branch {bounds:?}", "", pad = depth * INDENT)
}

pub(crate) fn write_leaf<T>(
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    bounds: &Aabb,
    elements: &[Element<T>],
) -> fmt::Result {
    write!(f, "{:pad$}leaf {bounds:?}", "", pad = depth * INDENT)?;

    for (i, element) in elements.iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        write!(f, "{sep}{:?}", element.position)?;
    }

    writeln!(f)
}
