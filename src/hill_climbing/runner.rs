//! Hill climbing execution.

use crate::evaluation::CostEvaluator;
use crate::local_search::{ImprovementPolicy, LocalSearch};
use crate::models::{Assignments, OpenSet, ProblemInstance};
use crate::neighborhood::Toggle;
use crate::observer::{IterationEvent, NoopObserver, SearchObserver};
use crate::stats::SearchStatistics;
use std::time::Instant;

/// Result of a hill climbing run.
#[derive(Debug, Clone)]
pub struct HillClimbingResult {
    /// Warehouses serving customers at the local optimum reached.
    pub best: OpenSet,
    /// Cost of `assignments`.
    pub best_cost: f64,
    pub assignments: Assignments,
    pub statistics: SearchStatistics,
    /// Cost after each step, starting from the all-open cost.
    pub cost_history: Vec<f64>,
}

/// Executes hill climbing.
pub struct HillClimbingRunner;

impl HillClimbingRunner {
    /// Runs hill climbing from the all-open solution.
    pub fn run(problem: &ProblemInstance) -> HillClimbingResult {
        Self::run_observed(problem, &mut NoopObserver)
    }

    /// Runs hill climbing, reporting one event per applied toggle.
    pub fn run_observed(
        problem: &ProblemInstance,
        observer: &mut dyn SearchObserver,
    ) -> HillClimbingResult {
        let started = Instant::now();
        let evaluator = CostEvaluator::new(problem);
        let start = OpenSet::all_open(problem.num_warehouses());

        let descent = LocalSearch::new(problem, ImprovementPolicy::Best).descend(start, &Toggle);
        log::debug!(
            "hill climbing: {} steps, {} evaluations",
            descent.steps,
            descent.evaluations
        );

        if observer.enabled() {
            // Replay the path to report the state after every step.
            let mut state = OpenSet::all_open(problem.num_warehouses());
            for (step, mv) in descent.moves.iter().enumerate() {
                mv.apply(&mut state);
                let cost = descent.cost_trace[step + 1];
                observer.on_iteration(&IterationEvent {
                    algorithm: "hill_climbing",
                    iteration: step + 1,
                    comparisons: descent.evaluation_trace[step + 1],
                    facility: Some(mv.facility()),
                    customer: None,
                    open_facilities: state.open_count(),
                    cost,
                    assignment_cost: cost - evaluator.fixed_cost(&state),
                });
            }
        }

        let settled = evaluator.settle(&descent.solution);
        let statistics = SearchStatistics {
            iterations: descent.steps,
            evaluations: descent.evaluations,
            improvements: descent.steps,
            accepted_moves: descent.steps,
            elapsed: started.elapsed(),
        };
        log::info!("hill climbing: best cost {}", settled.cost);

        HillClimbingResult {
            best: settled.open,
            best_cost: settled.cost,
            assignments: settled.assignments,
            statistics,
            cost_history: descent.cost_trace,
        }
    }
}
