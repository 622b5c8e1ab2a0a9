//! Anchor point generation.

use super::geometry::Rect;
use crate::model::{Point, Solution};
use std::collections::BTreeSet;

/// How candidate anchor points of a container are produced.
///
/// One strategy is chosen per [`Solution`] and never mixed. Both yield the
/// same placements: the frontier only omits points already occupied by an
/// item's bottom-left corner, which no other item could take anyway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorStrategy {
    /// Incrementally maintained set of untried points, seeded with the
    /// origin. Each insertion consumes its point and adds the new item's
    /// top-edge `(x, y+h)` and right-edge `(x+w, y)` points. Recomputed from
    /// the remaining members whenever items leave the container.
    #[default]
    Frontier,
    /// Recomputed on every query as the origin plus the top-left and
    /// bottom-right projections of every member.
    Corners,
}

impl Solution {
    /// Anchor points of a container in ascending `(y, x)` order.
    pub fn anchor_points(&self, container: usize) -> Vec<Point> {
        match self.strategy() {
            AnchorStrategy::Frontier => self.state(container).frontier.iter().copied().collect(),
            AnchorStrategy::Corners => {
                let mut points = BTreeSet::new();
                points.insert(Point::ORIGIN);
                for &id in self.members(container) {
                    if let Some(rect) = self.rect(id) {
                        points.insert(Point::new(rect.right(), rect.y));
                        points.insert(Point::new(rect.x, rect.top()));
                    }
                }
                points.into_iter().collect()
            }
        }
    }

    /// Applies one committed insertion to a container's frontier.
    pub(crate) fn advance_frontier(&mut self, container: usize, rect: Rect) {
        if self.strategy() != AnchorStrategy::Frontier {
            return;
        }
        let frontier = &mut self.state_mut(container).frontier;
        frontier.remove(&Point::new(rect.x, rect.y));
        frontier.insert(Point::new(rect.x, rect.top()));
        frontier.insert(Point::new(rect.right(), rect.y));
    }

    /// Rebuilds a container's frontier from its current members.
    pub(crate) fn recompute_frontier(&mut self, container: usize) {
        if self.strategy() != AnchorStrategy::Frontier {
            return;
        }
        let rects: Vec<Rect> = self
            .members(container)
            .iter()
            .filter_map(|&id| self.rect(id))
            .collect();
        let frontier = &mut self.state_mut(container).frontier;
        frontier.clear();
        frontier.insert(Point::ORIGIN);
        for rect in rects {
            self.advance_frontier(container, rect);
        }
    }
}
