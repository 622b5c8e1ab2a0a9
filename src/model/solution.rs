//! Mutable packing state.

use super::instance::Instance;
use super::types::{Placement, Point};
use crate::error::{PackError, Result};
use crate::placement::{AnchorStrategy, Rect};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Per-container mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ContainerState {
    /// Member item IDs in insertion order.
    pub(crate) items: Vec<usize>,
    /// Untried anchor points; maintained only under [`AnchorStrategy::Frontier`].
    pub(crate) frontier: BTreeSet<Point>,
}

impl ContainerState {
    fn fresh(strategy: AnchorStrategy) -> Self {
        let mut frontier = BTreeSet::new();
        if strategy == AnchorStrategy::Frontier {
            frontier.insert(Point::ORIGIN);
        }
        Self {
            items: Vec::new(),
            frontier,
        }
    }
}

/// A (possibly partial) assignment of items to containers.
///
/// Cloning copies placements, memberships and frontiers; the instance is
/// shared. A clone is the snapshot used for rollback by the search engines.
///
/// A container is *used* exactly when its membership is non-empty, so the
/// used flag can never drift from the membership.
#[derive(Debug, Clone)]
pub struct Solution {
    instance: Arc<Instance>,
    strategy: AnchorStrategy,
    placements: Vec<Option<Placement>>,
    containers: Vec<ContainerState>,
}

impl Solution {
    /// Creates an empty solution using the default anchor strategy.
    pub fn new(instance: Arc<Instance>) -> Self {
        Self::with_strategy(instance, AnchorStrategy::default())
    }

    /// Creates an empty solution with an explicit anchor strategy.
    ///
    /// The strategy is fixed for the lifetime of the solution and all of
    /// its clones.
    pub fn with_strategy(instance: Arc<Instance>, strategy: AnchorStrategy) -> Self {
        let placements = vec![None; instance.item_count()];
        let containers = (0..instance.container_count())
            .map(|_| ContainerState::fresh(strategy))
            .collect();
        Self {
            instance,
            strategy,
            placements,
            containers,
        }
    }

    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    pub fn strategy(&self) -> AnchorStrategy {
        self.strategy
    }

    /// Recorded placement of an item, `None` when unassigned.
    pub fn placement(&self, item: usize) -> Option<Placement> {
        self.placements[item - 1]
    }

    /// Member item IDs of a container, in insertion order.
    pub fn members(&self, container: usize) -> &[usize] {
        &self.containers[container - 1].items
    }

    pub fn is_used(&self, container: usize) -> bool {
        !self.containers[container - 1].items.is_empty()
    }

    /// Sum of opening costs over used containers.
    pub fn total_cost(&self) -> u64 {
        self.instance
            .containers()
            .iter()
            .filter(|c| self.is_used(c.id))
            .map(|c| c.cost)
            .sum()
    }

    pub fn used_count(&self) -> usize {
        self.containers.iter().filter(|c| !c.items.is_empty()).count()
    }

    /// IDs of items without a placement, ascending.
    pub fn unplaced(&self) -> Vec<usize> {
        self.placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(i, _)| i + 1)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.placements.iter().all(Option::is_some)
    }

    /// Finds the container holding `item` by scanning memberships.
    ///
    /// Does not consult the item's recorded placement.
    pub fn container_of(&self, item: usize) -> Option<usize> {
        self.containers
            .iter()
            .position(|c| c.items.contains(&item))
            .map(|i| i + 1)
    }

    /// Placed rectangle of an item, if assigned.
    pub fn rect(&self, item: usize) -> Option<Rect> {
        self.placement(item)
            .map(|p| Rect::placed(self.instance.item(item), &p))
    }

    /// Checks every structural invariant of a complete solution.
    ///
    /// Verifies that every item is placed, that memberships and recorded
    /// placements agree, that every item lies within its container, and that
    /// no two items of a container overlap.
    pub fn verify(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(PackError::InvalidSolution(msg)) };

        for (idx, placement) in self.placements.iter().enumerate() {
            let id = idx + 1;
            let Some(p) = placement else {
                return invalid(format!("item {id} is not placed"));
            };
            if p.container == 0 || p.container > self.containers.len() {
                return invalid(format!(
                    "item {id} refers to unknown container {}",
                    p.container
                ));
            }
            let hosts = self
                .containers
                .iter()
                .filter(|c| c.items.contains(&id))
                .count();
            if hosts != 1 || !self.members(p.container).contains(&id) {
                return invalid(format!(
                    "item {id} is listed by {hosts} containers, expected only container {}",
                    p.container
                ));
            }
        }

        for container in self.instance.containers() {
            let members = self.members(container.id);
            let rects: Vec<(usize, Rect)> = members
                .iter()
                .filter_map(|&id| self.rect(id).map(|r| (id, r)))
                .collect();

            for &(id, rect) in &rects {
                if !rect.fits_within(container.width, container.height) {
                    return invalid(format!(
                        "item {id} exceeds the bounds of container {}",
                        container.id
                    ));
                }
            }

            for (i, &(a, ra)) in rects.iter().enumerate() {
                for &(b, rb) in &rects[i + 1..] {
                    if ra.intersects(&rb) {
                        return invalid(format!(
                            "items {a} and {b} overlap in container {}",
                            container.id
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    pub(crate) fn set_placement(&mut self, item: usize, placement: Option<Placement>) {
        self.placements[item - 1] = placement;
    }

    pub(crate) fn state(&self, container: usize) -> &ContainerState {
        &self.containers[container - 1]
    }

    pub(crate) fn state_mut(&mut self, container: usize) -> &mut ContainerState {
        &mut self.containers[container - 1]
    }

    /// Empties every container, keeping item placements untouched.
    pub(crate) fn clear_containers(&mut self) {
        let strategy = self.strategy;
        for state in &mut self.containers {
            *state = ContainerState::fresh(strategy);
        }
    }
}
