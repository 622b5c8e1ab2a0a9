//! LNS execution loop.

use super::config::{Acceptance, LnsConfig};
use super::operators::{CostBiasedDestroy, LargestFirstRepair};
use super::types::{DestroyOperator, RepairOperator};
use crate::error::{PackError, Result};
use crate::model::Solution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an LNS run.
#[derive(Debug, Clone)]
pub struct LnsResult {
    /// The best solution found.
    pub best: Solution,

    /// Cost of the best solution.
    pub best_cost: u64,

    /// Number of rounds completed.
    pub rounds: usize,

    /// Total destroy/repair trials executed.
    pub trials: usize,

    /// Trials that strictly improved the baseline.
    pub accepted: usize,

    /// Trials abandoned because repair could not place an item.
    pub failed_repairs: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Seed the generator was created from.
    pub seed: u64,

    /// Best cost at the start and after every completed round.
    pub cost_history: Vec<u64>,
}

/// Executes the LNS algorithm.
pub struct LnsRunner;

impl LnsRunner {
    /// Runs LNS from `initial` with cost-biased destroy and largest-first
    /// repair.
    ///
    /// `initial` should be complete; items it leaves unplaced are never
    /// touched.
    pub fn run(initial: &Solution, config: &LnsConfig) -> Result<LnsResult> {
        Self::run_with_cancel(initial, config, None)
    }

    /// Runs LNS with an optional cancellation token, checked before every
    /// trial.
    pub fn run_with_cancel(
        initial: &Solution,
        config: &LnsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LnsResult> {
        Self::run_with_operators(
            initial,
            &CostBiasedDestroy,
            &LargestFirstRepair,
            config,
            cancel,
        )
    }

    /// Runs LNS with custom destroy and repair operators.
    ///
    /// Each trial works on a clone of the round baseline. A trial whose
    /// cost is strictly lower replaces the baseline; any other trial,
    /// including one whose repair fails with
    /// [`PackError::PlacementInfeasible`], is discarded.
    pub fn run_with_operators<D, RP>(
        initial: &Solution,
        destroy: &D,
        repair: &RP,
        config: &LnsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LnsResult>
    where
        D: DestroyOperator,
        RP: RepairOperator,
    {
        config.validate().map_err(PackError::InvalidConfig)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut best = initial.clone();
        let mut best_cost = best.total_cost();

        log::info!(
            "LNS start: cost {best_cost}, {} rounds x {} trials, destroy={} repair={} seed={seed}",
            config.rounds,
            config.iterations,
            destroy.name(),
            repair.name()
        );

        let mut trials = 0usize;
        let mut accepted = 0usize;
        let mut failed_repairs = 0usize;
        let mut rounds = 0usize;
        let mut cancelled = false;

        let mut cost_history = Vec::with_capacity(config.rounds + 1);
        cost_history.push(best_cost);

        'rounds: for round in 0..config.rounds {
            for _ in 0..config.iterations {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break 'rounds;
                    }
                }

                trials += 1;
                let mut candidate = best.clone();
                let removed = destroy.destroy(&mut candidate, config.destroy_rate, &mut rng);

                match repair.repair(&mut candidate, &removed, &mut rng) {
                    Ok(()) => {}
                    Err(PackError::PlacementInfeasible { item }) => {
                        failed_repairs += 1;
                        log::debug!("round {round}: repair could not place item {item}, rolled back");
                        continue;
                    }
                    Err(err) => return Err(err),
                }

                let cost = candidate.total_cost();
                if cost < best_cost {
                    log::debug!(
                        "round {round}: accepted trial, cost {best_cost} -> {cost} ({} items moved)",
                        removed.len()
                    );
                    best = candidate;
                    best_cost = cost;
                    accepted += 1;
                    if config.acceptance == Acceptance::FirstImprovement {
                        break;
                    }
                }
            }

            rounds += 1;
            cost_history.push(best_cost);
            log::debug!("round {round} done: best cost {best_cost}");
        }

        log::info!(
            "LNS done: cost {best_cost} after {rounds} rounds, {trials} trials ({accepted} accepted, {failed_repairs} failed repairs){}",
            if cancelled { ", cancelled" } else { "" }
        );

        Ok(LnsResult {
            best,
            best_cost,
            rounds,
            trials,
            accepted,
            failed_repairs,
            cancelled,
            seed,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::construct;
    use crate::lns::UniformDestroy;
    use crate::model::Instance;
    use rand::Rng;

    /// Greedy puts the small item in the cheap 2x2 container and the large
    /// one in the 6x4 container (cost 7); both fit the 6x4 alone (cost 5).
    fn improvable() -> Solution {
        let instance = Instance::new(&[(2, 2), (4, 4)], &[(6, 4, 5), (2, 2, 2)]).unwrap();
        construct(Arc::new(instance)).unwrap()
    }

    fn random_instance(seed: u64, items: usize, containers: usize) -> Arc<Instance> {
        let mut rng = StdRng::seed_from_u64(seed);
        let items: Vec<(u64, u64)> = (0..items)
            .map(|_| (rng.random_range(1..=5), rng.random_range(1..=5)))
            .collect();
        let containers: Vec<(u64, u64, u64)> = (0..containers)
            .map(|_| {
                (
                    rng.random_range(5..=10),
                    rng.random_range(5..=10),
                    rng.random_range(1..=20),
                )
            })
            .collect();
        Arc::new(Instance::new(&items, &containers).unwrap())
    }

    #[test]
    fn test_lns_finds_consolidation() {
        let initial = improvable();
        assert_eq!(initial.total_cost(), 7);

        let config = LnsConfig::default()
            .with_rounds(3)
            .with_iterations(50)
            .with_destroy_rate(1.0)
            .with_seed(42);
        let result = LnsRunner::run(&initial, &config).unwrap();

        assert_eq!(result.best_cost, 5);
        assert_eq!(result.best.total_cost(), 5);
        assert_eq!(result.accepted, 1);
        assert_eq!(result.rounds, 3);
        assert_eq!(result.trials, 150);
        result.best.verify().unwrap();
    }

    #[test]
    fn test_first_improvement_ends_round() {
        let config = LnsConfig::default()
            .with_rounds(1)
            .with_iterations(50)
            .with_destroy_rate(1.0)
            .with_acceptance(Acceptance::FirstImprovement)
            .with_seed(9);
        let result = LnsRunner::run(&improvable(), &config).unwrap();

        assert_eq!(result.best_cost, 5);
        assert_eq!(result.accepted, 1);
        assert!(result.trials < 50);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let instance = random_instance(1, 40, 12);
        let initial = construct(instance).unwrap();
        let config = LnsConfig::default()
            .with_rounds(10)
            .with_iterations(20)
            .with_seed(42);

        let result = LnsRunner::run(&initial, &config).unwrap();

        assert_eq!(result.cost_history.len(), 11);
        assert_eq!(result.cost_history[0], initial.total_cost());
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.cost_history.last(), Some(&result.best_cost));
        result.best.verify().unwrap();
    }

    #[test]
    fn test_deterministic_given_seed() {
        let initial = construct(random_instance(2, 30, 10)).unwrap();
        let config = LnsConfig::default()
            .with_rounds(5)
            .with_iterations(20)
            .with_seed(1234);

        let a = LnsRunner::run(&initial, &config).unwrap();
        let b = LnsRunner::run(&initial, &config).unwrap();

        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.cost_history, b.cost_history);
        assert_eq!(a.accepted, b.accepted);
        for item in 1..=30 {
            assert_eq!(a.best.placement(item), b.best.placement(item));
        }
    }

    #[test]
    fn test_unseeded_run_reports_seed() {
        let initial = improvable();
        let config = LnsConfig::default().with_rounds(1).with_iterations(5);
        let first = LnsRunner::run(&initial, &config).unwrap();

        let replay = LnsRunner::run(&initial, &config.clone().with_seed(first.seed)).unwrap();
        assert_eq!(first.cost_history, replay.cost_history);
    }

    #[test]
    fn test_cancelled_before_start() {
        let initial = improvable();
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            LnsRunner::run_with_cancel(&initial, &LnsConfig::default().with_seed(1), Some(cancel))
                .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.trials, 0);
        assert_eq!(result.rounds, 0);
        assert_eq!(result.best_cost, 7);
    }

    #[test]
    fn test_invalid_config() {
        let config = LnsConfig::default().with_destroy_rate(0.0);
        let err = LnsRunner::run(&improvable(), &config).unwrap_err();
        assert!(matches!(err, PackError::InvalidConfig(_)));
    }

    struct FailingRepair;

    impl RepairOperator for FailingRepair {
        fn name(&self) -> &str {
            "failing"
        }

        fn repair<R: Rng>(
            &self,
            _solution: &mut Solution,
            removed: &[usize],
            _rng: &mut R,
        ) -> Result<()> {
            Err(PackError::PlacementInfeasible {
                item: removed.first().copied().unwrap_or(0),
            })
        }
    }

    #[test]
    fn test_failed_repair_rolls_back() {
        let initial = improvable();
        let config = LnsConfig::default()
            .with_rounds(2)
            .with_iterations(10)
            .with_seed(3);

        let result =
            LnsRunner::run_with_operators(&initial, &UniformDestroy, &FailingRepair, &config, None)
                .unwrap();

        assert_eq!(result.failed_repairs, 20);
        assert_eq!(result.accepted, 0);
        assert_eq!(result.best_cost, 7);
        for item in 1..=2 {
            assert_eq!(result.best.placement(item), initial.placement(item));
        }
        result.best.verify().unwrap();
    }

    #[test]
    fn test_uniform_destroy_operator() {
        let initial = construct(random_instance(5, 25, 8)).unwrap();
        let config = LnsConfig::default()
            .with_rounds(4)
            .with_iterations(15)
            .with_seed(8);

        let result =
            LnsRunner::run_with_operators(&initial, &UniformDestroy, &LargestFirstRepair, &config, None)
                .unwrap();

        assert!(result.best_cost <= initial.total_cost());
        result.best.verify().unwrap();
    }
}
