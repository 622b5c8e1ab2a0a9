//! Axis-aligned rectangle tests.

use crate::model::{Item, Placement, Point};

/// An axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u64,
    pub y: u64,
    pub width: u64,
    pub height: u64,
}

impl Rect {
    pub fn new(x: u64, y: u64, width: u64, height: u64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covered by `item` when staged at `at` with `rotated`.
    pub fn at(item: &Item, at: Point, rotated: bool) -> Self {
        let (width, height) = item.dimensions(rotated);
        Self::new(at.x, at.y, width, height)
    }

    /// Rectangle covered by `item` under `placement`.
    pub fn placed(item: &Item, placement: &Placement) -> Self {
        Self::at(item, placement.origin(), placement.rotated)
    }

    /// Right edge, saturating at `u64::MAX`.
    pub fn right(&self) -> u64 {
        self.x.saturating_add(self.width)
    }

    /// Top edge, saturating at `u64::MAX`.
    pub fn top(&self) -> u64 {
        self.y.saturating_add(self.height)
    }

    /// Open-interval overlap: shared edges or corners do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }

    /// Whether the rectangle lies inside `[0, width] x [0, height]`.
    ///
    /// An edge that overflows `u64` never fits.
    pub fn fits_within(&self, width: u64, height: u64) -> bool {
        let right = self.x.checked_add(self.width);
        let top = self.y.checked_add(self.height);
        right.is_some_and(|r| r <= width) && top.is_some_and(|t| t <= height)
    }
}

/// Two rectangles intersect iff both their X and Y projections overlap by a
/// positive amount.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x.max(b.x) < a.right().min(b.right()) && a.y.max(b.y) < a.top().min(b.top())
}
