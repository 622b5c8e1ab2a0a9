//! Relocation hill climbing engine.
//!
//! # Algorithm
//!
//! 1. Scan items in ID order; find each item's container by membership.
//! 2. For every other container in `(cost, ID)` order, every anchor point
//!    and both orientations, evaluate moving the item there.
//! 3. Commit the first move whose resulting total cost is strictly lower
//!    and restart from the first item.
//! 4. Stop when a full scan finds no such move.
//!
//! A relocation changes the cost only through the source emptying
//! (`-source.cost`) and the destination opening (`+destination.cost`), so
//! the delta is computed before any geometry is tested.

use super::config::HillClimbConfig;
use crate::model::{Placement, Solution};

/// Result of a hill climbing run.
#[derive(Debug, Clone)]
pub struct HillClimbResult {
    /// Locally optimal solution.
    pub best: Solution,
    /// Cost of the best solution.
    pub best_cost: u64,
    /// Number of accepted relocations.
    pub improvements: usize,
    /// Number of scans started, including the final unproductive one.
    pub passes: usize,
    /// Cost after each accepted relocation, starting with the initial cost.
    pub cost_history: Vec<u64>,
}

/// An improving relocation of one item.
#[derive(Debug, Clone, Copy)]
struct Relocation {
    item: usize,
    placement: Placement,
    cost: u64,
}

/// Relocation hill climbing runner.
pub struct HillClimbRunner;

impl HillClimbRunner {
    /// Improves `initial` until no single-item relocation lowers the cost.
    pub fn run(initial: &Solution, config: &HillClimbConfig) -> HillClimbResult {
        let mut current = initial.clone();
        let mut best_cost = current.total_cost();
        let mut cost_history = vec![best_cost];
        let mut improvements = 0usize;
        let mut passes = 0usize;

        loop {
            if config.max_improvements.is_some_and(|cap| improvements >= cap) {
                break;
            }
            passes += 1;

            let found = (1..=current.instance().item_count())
                .find_map(|item| improving_move(&current, item, best_cost, config.parallel));
            let Some(mv) = found else {
                break;
            };

            let source = current.remove(mv.item);
            current.insert(mv.item, mv.placement);
            debug_assert_eq!(current.total_cost(), mv.cost);

            log::trace!(
                "relocated item {} from container {:?} to {}, cost {} -> {}",
                mv.item,
                source,
                mv.placement.container,
                best_cost,
                mv.cost
            );
            best_cost = mv.cost;
            improvements += 1;
            cost_history.push(best_cost);
        }

        log::info!(
            "hill climbing done: cost {best_cost} after {improvements} relocations in {passes} passes"
        );

        HillClimbResult {
            best: current,
            best_cost,
            improvements,
            passes,
            cost_history,
        }
    }
}

/// First improving relocation of `item`, in destination scan order.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn improving_move(
    solution: &Solution,
    item: usize,
    current_cost: u64,
    parallel: bool,
) -> Option<Relocation> {
    let source = solution.container_of(item)?;
    let instance = solution.instance();

    // Unless the source empties, no relocation can lower the cost.
    if solution.members(source).len() != 1 {
        return None;
    }
    let freed = instance.container(source).cost;

    let evaluate = |destination: usize| -> Option<Relocation> {
        if destination == source {
            return None;
        }
        let opened = if solution.is_used(destination) {
            0
        } else {
            instance.container(destination).cost
        };
        let cost = current_cost - freed + opened;
        if cost >= current_cost {
            return None;
        }
        solution
            .first_fit_in(item, destination)
            .map(|placement| Relocation {
                item,
                placement,
                cost,
            })
    };

    let order = instance.cost_order();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if parallel {
            return order.par_iter().find_map_first(|&dst| evaluate(dst));
        }
    }

    order.iter().find_map(|&dst| evaluate(dst))
}
