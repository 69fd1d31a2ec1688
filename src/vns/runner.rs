//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Start with every warehouse open and descend to a local optimum x
//! 2. For each outer iteration, with k = 1:
//!    a. **Shaking**: flip k random warehouses of x → x'
//!    b. **Local search**: first-improvement toggle descent from x' → x''
//!    c. **Move or not**: if f(x'') < f(x), set x = x'', k = 1 and end the
//!    iteration; otherwise k = k + 1
//!    d. If k passes k_max, reset k = 1 and end the iteration
//! 3. Return x

use super::config::VnsConfig;
use crate::evaluation::{improves, CostEvaluator};
use crate::local_search::{ImprovementPolicy, LocalSearch};
use crate::models::{Assignments, OpenSet, ProblemInstance};
use crate::neighborhood::{shake, Toggle};
use crate::observer::{IterationEvent, NoopObserver, SearchObserver};
use crate::random::rng_for;
use crate::stats::SearchStatistics;
use rand::Rng;
use std::time::Instant;

/// Shake-size counter with the VNS reset law.
///
/// # Examples
///
/// ```
/// use u_facility::vns::NeighborhoodIndex;
///
/// let mut index = NeighborhoodIndex::new(3);
/// assert_eq!(index.k(), 1);
/// assert!(!index.advance(false));
/// assert_eq!(index.k(), 2);
/// assert!(index.advance(true));
/// assert_eq!(index.k(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborhoodIndex {
    k: usize,
    k_max: usize,
}

impl NeighborhoodIndex {
    pub fn new(k_max: usize) -> Self {
        Self { k: 1, k_max }
    }

    /// Current shake size, in `1..=k_max`.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Moves to the next shake size after an attempt.
    ///
    /// Success resets `k` to 1; failure increments it, wrapping to 1 after
    /// `k_max`. Returns `true` when the outer iteration is over (success or
    /// wrap).
    pub fn advance(&mut self, improved: bool) -> bool {
        if improved || self.k >= self.k_max {
            self.k = 1;
            true
        } else {
            self.k += 1;
            false
        }
    }
}

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult {
    /// Warehouses serving customers in the best solution found.
    pub best: OpenSet,
    /// Cost of `assignments`, equal to the open-set cost of `best`.
    pub best_cost: f64,
    pub assignments: Assignments,
    /// Shake + descent attempts executed.
    pub shakes: usize,
    /// Outer iteration at which the best solution was found (0 for the
    /// initial descent).
    pub best_iteration: usize,
    pub statistics: SearchStatistics,
    /// Best cost after the initial descent and after each outer iteration.
    pub cost_history: Vec<f64>,
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes Basic VNS on the given problem.
    pub fn run(problem: &ProblemInstance, config: &VnsConfig) -> VnsResult {
        Self::run_observed(problem, config, &mut NoopObserver)
    }

    /// Runs VNS, reporting one event per outer iteration.
    pub fn run_observed(
        problem: &ProblemInstance,
        config: &VnsConfig,
        observer: &mut dyn SearchObserver,
    ) -> VnsResult {
        let mut rng = rng_for(config.seed);
        Self::run_with_rng(problem, config, &mut rng, observer)
    }

    /// Runs VNS drawing from a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        problem: &ProblemInstance,
        config: &VnsConfig,
        rng: &mut R,
        observer: &mut dyn SearchObserver,
    ) -> VnsResult {
        config.validate().expect("invalid VnsConfig");
        let started = Instant::now();

        let evaluator = CostEvaluator::new(problem);
        let local_search = LocalSearch::new(problem, ImprovementPolicy::First);

        // Initialize with local search
        let initial = local_search.descend(OpenSet::all_open(problem.num_warehouses()), &Toggle);
        let mut current = initial.solution;
        let mut current_cost = initial.cost;
        let mut stats = SearchStatistics {
            evaluations: initial.evaluations,
            ..SearchStatistics::default()
        };
        log::info!(
            "vns: initial local optimum {current_cost}, k_max {}, {} iterations",
            config.k_max,
            config.max_iterations
        );

        let mut index = NeighborhoodIndex::new(config.k_max);
        let mut shakes = 0usize;
        let mut best_iteration = 0usize;
        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(current_cost);

        for iteration in 1..=config.max_iterations {
            let mut last_flip = None;
            loop {
                let k = index.k();
                let shaken = shake(&current, k, rng);
                let candidate = local_search.descend(shaken, &Toggle);
                shakes += 1;
                stats.evaluations += candidate.evaluations;

                let improved = improves(candidate.cost, current_cost);
                if improved {
                    log::trace!("vns: k={k} improved {current_cost} -> {}", candidate.cost);
                    last_flip = candidate.moves.last().map(|mv| mv.facility());
                    current = candidate.solution;
                    current_cost = candidate.cost;
                    best_iteration = iteration;
                    stats.improvements += 1;
                    stats.accepted_moves += 1;
                }
                if index.advance(improved) {
                    break;
                }
            }

            stats.iterations += 1;
            cost_history.push(current_cost);
            log::debug!("vns iteration {iteration}: cost {current_cost}");

            if observer.enabled() {
                observer.on_iteration(&IterationEvent {
                    algorithm: "vns",
                    iteration,
                    comparisons: stats.evaluations,
                    facility: last_flip,
                    customer: None,
                    open_facilities: current.open_count(),
                    cost: current_cost,
                    assignment_cost: current_cost - evaluator.fixed_cost(&current),
                });
            }
        }

        let settled = evaluator.settle(&current);
        stats.elapsed = started.elapsed();
        log::info!("vns: best cost {} at iteration {best_iteration}", settled.cost);

        VnsResult {
            best: settled.open,
            best_cost: settled.cost,
            assignments: settled.assignments,
            shakes,
            best_iteration,
            statistics: stats,
            cost_history,
        }
    }
}
