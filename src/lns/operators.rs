//! Destroy and repair operators.

use super::types::{DestroyOperator, RepairOperator};
use crate::error::{PackError, Result};
use crate::model::Solution;
use crate::placement::ContainerPass;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Removes items sampled with replacement, weighted by the opening cost of
/// their current container relative to the most expensive one in use.
///
/// Draws `max(1, floor(placed * rate))` samples and deduplicates them, so
/// fewer items than drawn may be removed. Remaining items keep their exact
/// positions; container state is rebuilt from them in ID order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostBiasedDestroy;

impl DestroyOperator for CostBiasedDestroy {
    fn name(&self) -> &str {
        "cost-biased"
    }

    fn destroy<R: Rng>(&self, solution: &mut Solution, rate: f64, rng: &mut R) -> Vec<usize> {
        let placed = placed_with_cost(solution);
        if placed.is_empty() {
            return Vec::new();
        }

        let max_cost = placed.iter().map(|&(_, cost)| cost).max().unwrap_or(0);
        let weights: Vec<f64> = if max_cost == 0 {
            vec![1.0; placed.len()]
        } else {
            placed
                .iter()
                .map(|&(_, cost)| cost as f64 / max_cost as f64)
                .collect()
        };
        let Ok(dist) = WeightedIndex::new(&weights) else {
            return Vec::new();
        };

        let draws = removal_count(placed.len(), rate);
        let mut seen = HashSet::with_capacity(draws);
        let mut removed = Vec::with_capacity(draws);
        for _ in 0..draws {
            let id = placed[dist.sample(rng)].0;
            if seen.insert(id) {
                removed.push(id);
            }
        }

        unassign_and_rebuild(solution, &removed);
        removed
    }
}

/// Removes `max(1, floor(placed * rate))` distinct items chosen uniformly.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformDestroy;

impl DestroyOperator for UniformDestroy {
    fn name(&self) -> &str {
        "uniform"
    }

    fn destroy<R: Rng>(&self, solution: &mut Solution, rate: f64, rng: &mut R) -> Vec<usize> {
        let placed = placed_with_cost(solution);
        if placed.is_empty() {
            return Vec::new();
        }

        let amount = removal_count(placed.len(), rate);
        let removed: Vec<usize> = rand::seq::index::sample(rng, placed.len(), amount)
            .into_iter()
            .map(|i| placed[i].0)
            .collect();

        unassign_and_rebuild(solution, &removed);
        removed
    }
}

/// Reinserts removed items by descending area with first-fit placement,
/// trying already used containers before opening new ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFirstRepair;

impl RepairOperator for LargestFirstRepair {
    fn name(&self) -> &str {
        "largest-first"
    }

    fn repair<R: Rng>(
        &self,
        solution: &mut Solution,
        removed: &[usize],
        _rng: &mut R,
    ) -> Result<()> {
        let mut order = removed.to_vec();
        order.sort_by_key(|&id| Reverse(solution.instance().item(id).area()));

        for item in order {
            if solution.placement(item).is_some() {
                continue;
            }
            let placement = solution
                .first_fit(item, ContainerPass::Used)
                .or_else(|| solution.first_fit(item, ContainerPass::Unused))
                .ok_or(PackError::PlacementInfeasible { item })?;
            solution.insert(item, placement);
        }
        Ok(())
    }
}

/// `(item, container cost)` for every placed item, by ascending item ID.
fn placed_with_cost(solution: &Solution) -> Vec<(usize, u64)> {
    let instance = solution.instance();
    (1..=instance.item_count())
        .filter_map(|id| {
            solution
                .placement(id)
                .map(|p| (id, instance.container(p.container).cost))
        })
        .collect()
}

fn removal_count(placed: usize, rate: f64) -> usize {
    ((placed as f64 * rate).floor() as usize).clamp(1, placed)
}

fn unassign_and_rebuild(solution: &mut Solution, removed: &[usize]) {
    for &id in removed {
        solution.unassign(id);
    }
    solution.rebuild();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::construct;
    use crate::model::{Instance, Placement, Point};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn packed() -> Solution {
        let instance = Instance::new(
            &[(2, 2), (2, 2), (3, 1), (1, 3), (2, 1), (4, 4)],
            &[(4, 4, 5), (6, 6, 9), (3, 3, 2)],
        )
        .unwrap();
        construct(Arc::new(instance)).unwrap()
    }

    fn assert_consistent_after_destroy(sol: &Solution, removed: &[usize]) {
        for &id in removed {
            assert_eq!(sol.placement(id), None);
            assert_eq!(sol.container_of(id), None);
        }
        for id in 1..=sol.instance().item_count() {
            if let Some(p) = sol.placement(id) {
                assert_eq!(sol.container_of(id), Some(p.container));
            }
        }
    }

    #[test]
    fn test_removal_count() {
        assert_eq!(removal_count(10, 0.3), 3);
        assert_eq!(removal_count(3, 0.1), 1);
        assert_eq!(removal_count(4, 1.0), 4);
    }

    #[test]
    fn test_cost_biased_destroy_keeps_remaining_positions() {
        let mut sol = packed();
        let before = sol.clone();
        let mut rng = StdRng::seed_from_u64(7);

        let removed = CostBiasedDestroy.destroy(&mut sol, 0.5, &mut rng);

        assert!(!removed.is_empty());
        assert!(removed.len() <= 3);
        let unique: HashSet<_> = removed.iter().collect();
        assert_eq!(unique.len(), removed.len());
        assert_consistent_after_destroy(&sol, &removed);
        for id in 1..=6 {
            if !removed.contains(&id) {
                assert_eq!(sol.placement(id), before.placement(id));
            }
        }
    }

    #[test]
    fn test_cost_biased_destroy_prefers_expensive_containers() {
        let instance = Arc::new(Instance::new(&[(1, 1), (1, 1)], &[(1, 1, 1), (1, 1, 100)]).unwrap());
        let mut base = Solution::new(instance);
        base.insert(1, Placement::new(1, Point::ORIGIN, false));
        base.insert(2, Placement::new(2, Point::ORIGIN, false));

        let mut rng = StdRng::seed_from_u64(3);
        let mut expensive = 0;
        for _ in 0..200 {
            let mut sol = base.clone();
            let removed = CostBiasedDestroy.destroy(&mut sol, 0.5, &mut rng);
            assert_eq!(removed.len(), 1);
            if removed[0] == 2 {
                expensive += 1;
            }
        }
        assert!(expensive > 170, "expensive item removed {expensive}/200 times");
    }

    #[test]
    fn test_cost_biased_destroy_free_containers() {
        let instance = Arc::new(Instance::new(&[(1, 1), (1, 1)], &[(2, 2, 0)]).unwrap());
        let mut sol = construct(instance).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let removed = CostBiasedDestroy.destroy(&mut sol, 1.0, &mut rng);
        assert!(!removed.is_empty());
        assert_consistent_after_destroy(&sol, &removed);
    }

    #[test]
    fn test_destroy_on_empty_solution_is_noop() {
        let instance = Arc::new(Instance::new(&[(1, 1)], &[(2, 2, 1)]).unwrap());
        let mut sol = Solution::new(instance);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(CostBiasedDestroy.destroy(&mut sol, 0.5, &mut rng).is_empty());
        assert!(UniformDestroy.destroy(&mut sol, 0.5, &mut rng).is_empty());
    }

    #[test]
    fn test_uniform_destroy_exact_count() {
        let mut sol = packed();
        let mut rng = StdRng::seed_from_u64(11);
        let removed = UniformDestroy.destroy(&mut sol, 0.5, &mut rng);
        assert_eq!(removed.len(), 3);
        assert_consistent_after_destroy(&sol, &removed);
    }

    #[test]
    fn test_repair_restores_complete_solution() {
        let mut sol = packed();
        let mut rng = StdRng::seed_from_u64(5);
        let removed = CostBiasedDestroy.destroy(&mut sol, 1.0, &mut rng);
        LargestFirstRepair.repair(&mut sol, &removed, &mut rng).unwrap();
        assert!(sol.is_complete());
        sol.verify().unwrap();
    }

    #[test]
    fn test_repair_prefers_open_container() {
        let instance =
            Arc::new(Instance::new(&[(2, 2), (1, 1)], &[(4, 4, 10), (1, 1, 1)]).unwrap());
        let mut sol = Solution::new(instance);
        sol.insert(1, Placement::new(1, Point::ORIGIN, false));
        let mut rng = StdRng::seed_from_u64(0);

        LargestFirstRepair.repair(&mut sol, &[2], &mut rng).unwrap();

        assert_eq!(sol.placement(2), Some(Placement::new(1, Point::new(2, 0), false)));
        assert_eq!(sol.total_cost(), 10);
    }

    #[test]
    fn test_repair_places_largest_first() {
        // Only one of the two fits in the single free container; the larger
        // one is placed first and takes it.
        let instance = Arc::new(Instance::new(&[(1, 1), (2, 2)], &[(2, 2, 1)]).unwrap());
        let mut sol = Solution::new(instance);
        let mut rng = StdRng::seed_from_u64(0);

        let err = LargestFirstRepair.repair(&mut sol, &[1, 2], &mut rng).unwrap_err();

        assert!(matches!(err, PackError::PlacementInfeasible { item: 1 }));
        assert_eq!(sol.container_of(2), Some(1));
    }

    #[test]
    fn test_operator_names() {
        assert_eq!(CostBiasedDestroy.name(), "cost-biased");
        assert_eq!(UniformDestroy.name(), "uniform");
        assert_eq!(LargestFirstRepair.name(), "largest-first");
    }
}
