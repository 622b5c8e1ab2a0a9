//! Feasibility check, commit and structural updates.

use super::geometry::Rect;
use crate::model::{Placement, Point, Solution};

/// Which containers a scan visits, always in `(cost, ID)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerPass {
    /// Every container.
    All,
    /// Only containers that already hold an item.
    Used,
    /// Only empty containers.
    Unused,
}

impl ContainerPass {
    fn admits(self, used: bool) -> bool {
        match self {
            ContainerPass::All => true,
            ContainerPass::Used => used,
            ContainerPass::Unused => !used,
        }
    }
}

impl Solution {
    /// Tests whether `item` fits in `container` at `at` with `rotated`.
    ///
    /// Returns the staged placement on success. The solution is left
    /// untouched; commit with [`insert`](Self::insert) or drop the value.
    /// The item itself is never compared against (it may still be recorded
    /// elsewhere, e.g. when evaluating a relocation).
    pub fn can_place(
        &self,
        item: usize,
        container: usize,
        at: Point,
        rotated: bool,
    ) -> Option<Placement> {
        let bounds = self.instance().container(container);
        let rect = Rect::at(self.instance().item(item), at, rotated);
        if !rect.fits_within(bounds.width, bounds.height) {
            return None;
        }

        let clash = self
            .members(container)
            .iter()
            .filter(|&&other| other != item)
            .filter_map(|&other| self.rect(other))
            .any(|other| other.intersects(&rect));

        (!clash).then(|| Placement::new(container, at, rotated))
    }

    /// Commits a staged placement.
    ///
    /// Records the placement on the item, appends the item to the
    /// container's membership (marking it used) and advances the frontier.
    /// The item must not currently be a member of any container.
    pub fn insert(&mut self, item: usize, placement: Placement) {
        debug_assert!(
            self.container_of(item).is_none(),
            "item {item} is already a member of a container"
        );
        let rect = Rect::placed(self.instance().item(item), &placement);
        self.set_placement(item, Some(placement));
        self.state_mut(placement.container).items.push(item);
        self.advance_frontier(placement.container, rect);
    }

    /// Takes `item` out of the container whose membership lists it.
    ///
    /// The source container is found by membership, not by the item's
    /// recorded placement. Clears the item's placement and recomputes the
    /// source frontier. Returns the source container ID, if any.
    pub fn remove(&mut self, item: usize) -> Option<usize> {
        let source = self.container_of(item);
        if let Some(container) = source {
            self.state_mut(container).items.retain(|&id| id != item);
            self.recompute_frontier(container);
        }
        self.set_placement(item, None);
        source
    }

    /// Clears an item's recorded placement without touching memberships.
    ///
    /// Leaves the solution inconsistent until [`rebuild`](Self::rebuild)
    /// runs; used to batch removals.
    pub(crate) fn unassign(&mut self, item: usize) {
        self.set_placement(item, None);
    }

    /// Re-derives every container's membership and frontier from the
    /// recorded placements, re-inserting items in ID order at their stored
    /// position and orientation. No feasibility search is performed.
    pub fn rebuild(&mut self) {
        self.clear_containers();
        for id in 1..=self.instance().item_count() {
            if let Some(placement) = self.placement(id) {
                self.insert(id, placement);
            }
        }
    }

    /// Container IDs visited by `pass`, in `(cost, ID)` order.
    pub fn containers_in(&self, pass: ContainerPass) -> Vec<usize> {
        self.instance()
            .cost_order()
            .iter()
            .copied()
            .filter(|&c| pass.admits(self.is_used(c)))
            .collect()
    }

    /// First feasible placement of `item` in `container`: anchors in
    /// ascending `(y, x)`, unrotated before rotated.
    pub fn first_fit_in(&self, item: usize, container: usize) -> Option<Placement> {
        self.anchor_points(container).into_iter().find_map(|at| {
            [false, true]
                .into_iter()
                .find_map(|rotated| self.can_place(item, container, at, rotated))
        })
    }

    /// First feasible placement of `item` over the containers of `pass`.
    pub fn first_fit(&self, item: usize, pass: ContainerPass) -> Option<Placement> {
        self.containers_in(pass)
            .into_iter()
            .find_map(|container| self.first_fit_in(item, container))
    }
}
