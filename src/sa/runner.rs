//! SA execution loop.

use super::config::{InitialAssignment, NeighborMove, SaConfig};
use super::tabu::TabuLocalSearch;
use crate::evaluation::{improves, CostEvaluator};
use crate::models::{Assignment, Assignments, ProblemInstance};
use crate::neighborhood::{reassign_random, reassign_single};
use crate::observer::{IterationEvent, NoopObserver, SearchObserver};
use crate::random::rng_for;
use crate::stats::SearchStatistics;
use rand::Rng;
use std::time::Instant;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best assignment found.
    pub best: Assignment,

    /// Cost of the best assignment.
    pub best_cost: f64,

    /// `best` in output form.
    pub assignments: Assignments,

    /// Temperature when the schedule ended.
    pub final_temperature: f64,

    /// Temperature levels run.
    pub temperature_levels: usize,

    /// Restarts from a perturbed best assignment.
    pub perturbations: usize,

    pub statistics: SearchStatistics,

    /// Best cost at the start and after each temperature level.
    pub cost_history: Vec<f64>,
}

/// Metropolis acceptance rule.
///
/// Improvements (`delta < 0`) are always accepted without drawing from
/// `rng`; otherwise the move is accepted with probability
/// `exp(-delta / temperature)`.
pub fn metropolis_accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta < 0.0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    rng.random::<f64>() < (-delta / temperature).exp()
}

/// Customers reassigned by restart number `ordinal` (0-based): a third of
/// them on even ordinals, a fifth on odd ones, never fewer than one.
fn restart_size(ordinal: usize, num_customers: usize) -> usize {
    let size = if ordinal % 2 == 0 {
        num_customers / 3
    } else {
        num_customers / 5
    };
    size.max(1)
}

/// Executes Simulated Annealing over assignments, refining every neighbor
/// with [`TabuLocalSearch`] before the acceptance test.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    pub fn run(problem: &ProblemInstance, config: &SaConfig) -> SaResult {
        Self::run_observed(problem, config, &mut NoopObserver)
    }

    /// Runs SA, reporting one event per temperature level.
    pub fn run_observed(
        problem: &ProblemInstance,
        config: &SaConfig,
        observer: &mut dyn SearchObserver,
    ) -> SaResult {
        let mut rng = rng_for(config.seed);
        Self::run_with_rng(problem, config, &mut rng, observer)
    }

    /// Runs SA drawing from a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        problem: &ProblemInstance,
        config: &SaConfig,
        rng: &mut R,
        observer: &mut dyn SearchObserver,
    ) -> SaResult {
        config.validate().expect("invalid SaConfig");
        let started = Instant::now();

        let evaluator = CostEvaluator::new(problem);
        let tabu = TabuLocalSearch::new(config.tabu_tenure, config.max_stagnation_sweeps);
        let num_warehouses = problem.num_warehouses();
        let num_customers = problem.num_customers();
        let subset_size = (num_customers / 10).clamp(1, 25);

        let mut current = match config.initial_assignment {
            InitialAssignment::Random => Assignment::new(
                (0..num_customers)
                    .map(|_| rng.random_range(0..num_warehouses))
                    .collect(),
            ),
            InitialAssignment::Greedy => Assignment::greedy(problem),
        };
        let mut current_cost = evaluator.assignment_cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        log::info!(
            "sa: {num_warehouses} warehouses, {num_customers} customers, initial cost {current_cost}"
        );

        let mut stats = SearchStatistics {
            evaluations: 1,
            ..SearchStatistics::default()
        };
        let mut temperature = config.initial_temperature;
        let mut level = 0usize;
        let mut perturbations = 0usize;
        let mut cost_history = vec![best_cost];

        while temperature > config.final_temperature {
            for _ in 0..config.iterations_per_temperature {
                let mut candidate = match config.neighbor_move {
                    NeighborMove::PerturbSubset => {
                        reassign_random(&current, subset_size, num_warehouses, rng)
                    }
                    NeighborMove::SingleReassign => reassign_single(&current, num_warehouses, rng),
                };
                let refined = tabu.refine(problem, &mut candidate);
                stats.iterations += 1;
                // One scan per sweep plus the final recompute.
                stats.evaluations += refined.sweeps as u64 + 1;

                if metropolis_accept(refined.cost - current_cost, temperature, rng) {
                    current = candidate;
                    current_cost = refined.cost;
                    stats.accepted_moves += 1;

                    if improves(current_cost, best_cost) {
                        best = current.clone();
                        best_cost = current_cost;
                        stats.improvements += 1;
                        log::trace!("sa: new best {best_cost} at T={temperature}");
                    }
                }
            }

            temperature *= config.cooling_rate;
            level += 1;
            cost_history.push(best_cost);
            log::debug!(
                "sa level {level}: T={temperature:.4}, current {current_cost}, best {best_cost}"
            );

            if observer.enabled() {
                observer.on_iteration(&IterationEvent {
                    algorithm: "simulated_annealing",
                    iteration: level,
                    comparisons: stats.evaluations,
                    facility: None,
                    customer: None,
                    open_facilities: current.open_set(num_warehouses).open_count(),
                    cost: current_cost,
                    assignment_cost: evaluator.allocation_cost(&current),
                });
            }

            if config.perturbation_interval > 0 && level % config.perturbation_interval == 0 {
                let size = restart_size(perturbations, num_customers);
                current = reassign_random(&best, size, num_warehouses, rng);
                current_cost = evaluator.assignment_cost(&current);
                stats.evaluations += 1;
                perturbations += 1;
                log::debug!("sa: restart {perturbations} from best, {size} customers moved");
            }
        }

        stats.elapsed = started.elapsed();
        log::info!("sa: best cost {best_cost} after {level} levels");

        SaResult {
            assignments: best.to_assignments(),
            best,
            best_cost,
            final_temperature: temperature,
            temperature_levels: level,
            perturbations,
            statistics: stats,
            cost_history,
        }
    }
}
