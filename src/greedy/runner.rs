//! Greedy construction loop.

use super::config::{ConstructionRule, GreedyConfig};
use crate::error::{PackError, Result};
use crate::model::{Instance, Placement, Solution};
use crate::placement::ContainerPass;
use std::sync::Arc;

/// Builds an initial solution with the default configuration.
pub fn construct(instance: Arc<Instance>) -> Result<Solution> {
    GreedyRunner::run(instance, &GreedyConfig::default())
}

/// Executes greedy construction.
pub struct GreedyRunner;

impl GreedyRunner {
    /// Places every item of `instance`, in input order.
    ///
    /// # Errors
    ///
    /// [`PackError::PlacementInfeasible`] if some item fits no container.
    pub fn run(instance: Arc<Instance>, config: &GreedyConfig) -> Result<Solution> {
        let mut solution = Solution::with_strategy(instance, config.anchors);
        let order: Vec<usize> = solution.instance().items().iter().map(|it| it.id).collect();
        Self::place_all(&mut solution, &order, config.rule)?;

        log::info!(
            "greedy construction placed {} items in {} containers, cost {}",
            order.len(),
            solution.used_count(),
            solution.total_cost()
        );
        Ok(solution)
    }

    /// Places the given items into `solution` in the given order.
    ///
    /// Items already placed are skipped. Stops at the first item that
    /// cannot be placed; items placed before it stay committed.
    pub fn place_all(
        solution: &mut Solution,
        items: &[usize],
        rule: ConstructionRule,
    ) -> Result<()> {
        for &item in items {
            if solution.placement(item).is_some() {
                continue;
            }
            let placement = match rule {
                ConstructionRule::FirstFit => solution.first_fit(item, ContainerPass::All),
                ConstructionRule::LowestCorner => lowest_corner(solution, item),
            }
            .ok_or(PackError::PlacementInfeasible { item })?;

            log::trace!(
                "item {item} -> container {} at ({}, {}) rotated={}",
                placement.container,
                placement.x,
                placement.y,
                placement.rotated
            );
            solution.insert(item, placement);
        }
        Ok(())
    }
}

/// Lowest `(cost, x + y)` candidate, used containers first.
fn lowest_corner(solution: &Solution, item: usize) -> Option<Placement> {
    for pass in [ContainerPass::Used, ContainerPass::Unused] {
        let mut best: Option<(u64, u128, Placement)> = None;

        for container in solution.containers_in(pass) {
            let cost = solution.instance().container(container).cost;
            for at in solution.anchor_points(container) {
                for rotated in [false, true] {
                    let Some(placement) = solution.can_place(item, container, at, rotated) else {
                        continue;
                    };
                    let corner = u128::from(at.x) + u128::from(at.y);
                    let better = match best {
                        None => true,
                        Some((best_cost, best_corner, _)) => {
                            cost < best_cost || (cost == best_cost && corner < best_corner)
                        }
                    };
                    if better {
                        best = Some((cost, corner, placement));
                    }
                }
            }

            // Later containers cost at least as much.
            if best.is_some_and(|(best_cost, _, _)| cost >= best_cost) {
                break;
            }
        }

        if let Some((_, _, placement)) = best {
            return Some(placement);
        }
    }
    None
}
