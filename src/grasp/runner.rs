//! GRASP execution loop.

use super::config::GraspConfig;
use super::construct::construct;
use crate::evaluation::{improves, CostEvaluator, INFEASIBLE_COST};
use crate::local_search::{ImprovementPolicy, LocalSearch};
use crate::models::{Assignments, OpenSet, ProblemInstance};
use crate::neighborhood::{CloseOne, Neighborhood, OpenOne, SwapOpenClosed};
use crate::observer::{IterationEvent, NoopObserver, SearchObserver};
use crate::random::rng_for;
use crate::stats::SearchStatistics;
use rand::Rng;
use std::time::Instant;

/// Result of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    /// Warehouses serving customers in the best trial.
    pub best: OpenSet,

    /// Cost of `assignments`, equal to the open-set cost of `best`.
    pub best_cost: f64,

    /// Nearest-open assignment of `best`.
    pub assignments: Assignments,

    pub statistics: SearchStatistics,

    /// Best cost after each trial.
    pub cost_history: Vec<f64>,
}

/// Executes GRASP: randomized greedy construction followed by a
/// close / open / swap local search, repeated `config.iterations` times.
pub struct GraspRunner;

impl GraspRunner {
    /// Runs GRASP.
    pub fn run(problem: &ProblemInstance, config: &GraspConfig) -> GraspResult {
        Self::run_observed(problem, config, &mut NoopObserver)
    }

    /// Runs GRASP, reporting one event per trial.
    pub fn run_observed(
        problem: &ProblemInstance,
        config: &GraspConfig,
        observer: &mut dyn SearchObserver,
    ) -> GraspResult {
        let mut rng = rng_for(config.seed);
        Self::run_with_rng(problem, config, &mut rng, observer)
    }

    /// Runs GRASP drawing from a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        problem: &ProblemInstance,
        config: &GraspConfig,
        rng: &mut R,
        observer: &mut dyn SearchObserver,
    ) -> GraspResult {
        config.validate().expect("invalid GraspConfig");
        let started = Instant::now();

        let evaluator = CostEvaluator::new(problem);
        let local_search = LocalSearch::new(problem, ImprovementPolicy::Best);
        let operators: [&dyn Neighborhood; 3] = [&CloseOne, &OpenOne, &SwapOpenClosed];

        log::info!(
            "grasp: {} warehouses, {} customers, alpha {}, {} trials",
            problem.num_warehouses(),
            problem.num_customers(),
            config.alpha,
            config.iterations
        );

        let mut best = OpenSet::all_closed(problem.num_warehouses());
        let mut best_cost = INFEASIBLE_COST;
        let mut stats = SearchStatistics::default();
        let mut cost_history = Vec::with_capacity(config.iterations);

        for trial in 0..config.iterations {
            let built = construct(&evaluator, config.alpha, config.parallel, rng);
            let refined = local_search.cycle(built.open, &operators);

            stats.iterations += 1;
            stats.evaluations += built.evaluations + refined.evaluations;
            stats.accepted_moves += built.opened.len() + refined.steps;

            if improves(refined.cost, best_cost) {
                best = refined.solution.clone();
                best_cost = refined.cost;
                stats.improvements += 1;
            }
            cost_history.push(best_cost);

            log::debug!(
                "grasp trial {}: constructed {} -> refined {} (best {})",
                trial + 1,
                built.cost,
                refined.cost,
                best_cost
            );

            if observer.enabled() {
                let fixed = evaluator.fixed_cost(&refined.solution);
                observer.on_iteration(&IterationEvent {
                    algorithm: "grasp",
                    iteration: trial + 1,
                    comparisons: stats.evaluations,
                    facility: refined.moves.last().map(|mv| mv.facility()),
                    customer: None,
                    open_facilities: refined.solution.open_count(),
                    cost: refined.cost,
                    assignment_cost: refined.cost - fixed,
                });
            }
        }

        let settled = evaluator.settle(&best);
        stats.elapsed = started.elapsed();
        log::info!(
            "grasp: best cost {} with {} open",
            settled.cost,
            settled.open.open_count()
        );

        GraspResult {
            best: settled.open,
            best_cost: settled.cost,
            assignments: settled.assignments,
            statistics: stats,
            cost_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Warehouse};
    use crate::observer::RunLog;

    fn reference_problem() -> ProblemInstance {
        ProblemInstance::new(
            vec![Warehouse::new(100, 10.0), Warehouse::new(100, 20.0)],
            vec![
                Customer::new(1, vec![5.0, 8.0]),
                Customer::new(1, vec![4.0, 6.0]),
                Customer::new(1, vec![6.0, 9.0]),
            ],
        )
        .unwrap()
    }

    /// Six sites, three tight customer clusters; opening one site per
    /// cluster is optimal.
    fn clustered_problem() -> ProblemInstance {
        let warehouses = (0..6).map(|_| Warehouse::new(10, 25.0)).collect();
        let site_of_cluster = [0usize, 2, 4];
        let mut customers = Vec::new();
        for (cluster, &site) in site_of_cluster.iter().enumerate() {
            for offset in 0..3 {
                let costs = (0..6)
                    .map(|w| {
                        if w == site {
                            1.0 + offset as f64
                        } else if w / 2 == cluster {
                            5.0 + offset as f64
                        } else {
                            100.0
                        }
                    })
                    .collect();
                customers.push(Customer::new(1, costs));
            }
        }
        ProblemInstance::new(warehouses, customers).unwrap()
    }

    #[test]
    fn test_reference_optimum() {
        let problem = reference_problem();
        let config = GraspConfig::default().with_seed(42).with_iterations(5);
        let result = GraspRunner::run(&problem, &config);
        assert_eq!(result.best_cost, 25.0);
        assert_eq!(result.best, OpenSet::from_open_indices(2, &[0]));
        assert_eq!(
            result.assignments.as_signed_pairs(),
            vec![(0, 0), (1, 0), (2, 0)]
        );
    }

    #[test]
    fn test_clustered_optimum() {
        let problem = clustered_problem();
        let config = GraspConfig::default().with_seed(3).with_alpha(0.5);
        let result = GraspRunner::run(&problem, &config);
        // 3 * 25 fixed + (1 + 2 + 3) per cluster
        assert_eq!(result.best_cost, 93.0);
        assert_eq!(result.best, OpenSet::from_open_indices(6, &[0, 2, 4]));
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let problem = clustered_problem();
        let config = GraspConfig::default().with_seed(9).with_alpha(1.0);
        let result = GraspRunner::run(&problem, &config);
        assert_eq!(result.cost_history.len(), config.iterations);
        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(result.statistics.iterations, config.iterations);
        assert!(result.statistics.improvements >= 1);
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = clustered_problem();
        let config = GraspConfig::default().with_seed(11).with_alpha(1.0);
        let a = GraspRunner::run(&problem, &config);
        let b = GraspRunner::run(&problem, &config.clone().with_parallel(false));
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_single_warehouse() {
        let problem = ProblemInstance::new(
            vec![Warehouse::new(1, 7.0)],
            vec![Customer::new(1, vec![2.0]), Customer::new(1, vec![3.0])],
        )
        .unwrap();
        let result = GraspRunner::run(&problem, &GraspConfig::default().with_seed(0));
        assert_eq!(result.best_cost, 12.0);
        assert!(result.assignments.is_complete());
    }

    #[test]
    fn test_observer_gets_one_event_per_trial() {
        let problem = reference_problem();
        let config = GraspConfig::default().with_seed(1).with_iterations(4);
        let mut log = RunLog::new("reference");
        GraspRunner::run_observed(&problem, &config, &mut log);
        assert_eq!(log.len(), 4);
        assert!(log.events().iter().all(|e| e.algorithm == "grasp"));
        assert_eq!(log.events()[0].assignment_cost, 15.0);
    }

    #[test]
    #[should_panic(expected = "invalid GraspConfig")]
    fn test_invalid_config_panics() {
        let problem = reference_problem();
        GraspRunner::run(&problem, &GraspConfig::default().with_alpha(2.0));
    }
}
