//! Value types shared by the model and the search engines.

use std::cmp::Ordering;

/// A rectangular item ("box") with fixed nominal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Stable 1-based identifier.
    pub id: usize,
    /// Nominal width.
    pub width: u64,
    /// Nominal height.
    pub height: u64,
}

impl Item {
    pub fn new(id: usize, width: u64, height: u64) -> Self {
        Self { id, width, height }
    }

    /// Nominal area, widened so it cannot overflow.
    pub fn area(&self) -> u128 {
        u128::from(self.width) * u128::from(self.height)
    }

    /// Effective `(width, height)` under the given orientation.
    pub fn dimensions(&self, rotated: bool) -> (u64, u64) {
        if rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// A container with fixed capacity and an opening cost.
///
/// The cost is charged only while the container holds at least one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    /// Stable 1-based identifier.
    pub id: usize,
    /// Capacity along X.
    pub width: u64,
    /// Capacity along Y.
    pub height: u64,
    /// Opening cost.
    pub cost: u64,
}

impl Container {
    pub fn new(id: usize, width: u64, height: u64, cost: u64) -> Self {
        Self {
            id,
            width,
            height,
            cost,
        }
    }
}

/// A coordinate inside a container.
///
/// Points order by `(y, x)`, which is the order anchors are consumed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u64,
    pub y: u64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Where and how an item sits: container, bottom-left corner, orientation.
///
/// A `Placement` returned by a feasibility check is only staged; it takes
/// effect once committed with [`Solution::insert`](super::Solution::insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// ID of the hosting container.
    pub container: usize,
    pub x: u64,
    pub y: u64,
    /// Whether width and height are swapped.
    pub rotated: bool,
}

impl Placement {
    pub fn new(container: usize, at: Point, rotated: bool) -> Self {
        Self {
            container,
            x: at.x,
            y: at.y,
            rotated,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
