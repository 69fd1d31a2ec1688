//! One entry point for every algorithm.
//!
//! [`Algorithm`] selects a solver (and its configuration) at construction
//! time; all of them answer [`Solver::solve`] with the same [`Solved`] value.

use crate::grasp::{GraspConfig, GraspRunner};
use crate::hill_climbing::HillClimbingRunner;
use crate::models::{Assignments, ProblemInstance};
use crate::observer::{NoopObserver, SearchObserver};
use crate::sa::{SaConfig, SaRunner};
use crate::stats::SearchStatistics;
use crate::vns::{VnsConfig, VnsRunner};

/// Output of any solver.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solved {
    /// One warehouse per customer, in customer order.
    pub assignments: Assignments,
    /// Total cost of `assignments`.
    pub cost: f64,
    pub statistics: SearchStatistics,
}

/// A facility location solver.
pub trait Solver {
    /// Short name, as used in run logs.
    fn name(&self) -> &'static str;

    /// Solves `problem`, reporting progress to `observer`.
    fn solve_observed(&self, problem: &ProblemInstance, observer: &mut dyn SearchObserver)
        -> Solved;

    /// Solves `problem`.
    fn solve(&self, problem: &ProblemInstance) -> Solved {
        self.solve_observed(problem, &mut NoopObserver)
    }
}

/// The available solvers.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Customer, ProblemInstance, Warehouse};
/// use u_facility::solver::{Algorithm, Solver};
///
/// let problem = ProblemInstance::new(
///     vec![Warehouse::new(100, 10.0), Warehouse::new(100, 20.0)],
///     vec![
///         Customer::new(1, vec![5.0, 8.0]),
///         Customer::new(1, vec![4.0, 6.0]),
///         Customer::new(1, vec![6.0, 9.0]),
///     ],
/// )
/// .unwrap();
/// let solved = Algorithm::HillClimbing.solve(&problem);
/// assert_eq!(solved.cost, 25.0);
/// assert_eq!(solved.assignments.as_signed_pairs(), vec![(0, 0), (1, 0), (2, 0)]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    Grasp(GraspConfig),
    SimulatedAnnealing(SaConfig),
    HillClimbing,
    Vns(VnsConfig),
}

impl Solver for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Algorithm::Grasp(_) => "grasp",
            Algorithm::SimulatedAnnealing(_) => "simulated_annealing",
            Algorithm::HillClimbing => "hill_climbing",
            Algorithm::Vns(_) => "vns",
        }
    }

    fn solve_observed(
        &self,
        problem: &ProblemInstance,
        observer: &mut dyn SearchObserver,
    ) -> Solved {
        let solved = match self {
            Algorithm::Grasp(config) => {
                let r = GraspRunner::run_observed(problem, config, observer);
                Solved {
                    assignments: r.assignments,
                    cost: r.best_cost,
                    statistics: r.statistics,
                }
            }
            Algorithm::SimulatedAnnealing(config) => {
                let r = SaRunner::run_observed(problem, config, observer);
                Solved {
                    assignments: r.assignments,
                    cost: r.best_cost,
                    statistics: r.statistics,
                }
            }
            Algorithm::HillClimbing => {
                let r = HillClimbingRunner::run_observed(problem, observer);
                Solved {
                    assignments: r.assignments,
                    cost: r.best_cost,
                    statistics: r.statistics,
                }
            }
            Algorithm::Vns(config) => {
                let r = VnsRunner::run_observed(problem, config, observer);
                Solved {
                    assignments: r.assignments,
                    cost: r.best_cost,
                    statistics: r.statistics,
                }
            }
        };
        log::info!(
            "{}: cost {} in {:?} ({} evaluations)",
            self.name(),
            solved.cost,
            solved.statistics.elapsed,
            solved.statistics.evaluations
        );
        solved
    }
}
