//! Descent engine.

use crate::evaluation::{improves, CostEvaluator};
use crate::models::{OpenSet, ProblemInstance};
use crate::neighborhood::{Move, Neighborhood};

/// Which improving neighbor a descent step takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ImprovementPolicy {
    /// Take the first improving move in neighborhood order.
    First,
    /// Scan the whole neighborhood and take the best move (steepest descent).
    /// Ties keep the earliest move.
    #[default]
    Best,
}

/// Outcome of a descent.
#[derive(Debug, Clone)]
pub struct DescentResult {
    /// The local optimum reached.
    pub solution: OpenSet,
    /// Its cost.
    pub cost: f64,
    /// Number of moves applied.
    pub steps: usize,
    /// Number of cost evaluations, including the starting point.
    pub evaluations: u64,
    /// Cost after each step, starting with the initial cost. Strictly
    /// decreasing.
    pub cost_trace: Vec<f64>,
    /// Cumulative `evaluations` when each entry of `cost_trace` was reached.
    pub evaluation_trace: Vec<u64>,
    /// Applied moves in order.
    pub moves: Vec<Move>,
}

impl DescentResult {
    fn start(solution: OpenSet, cost: f64) -> Self {
        Self {
            solution,
            cost,
            steps: 0,
            evaluations: 1,
            cost_trace: vec![cost],
            evaluation_trace: vec![1],
            moves: Vec::new(),
        }
    }
}

/// Descent over open sets with a fixed improvement policy.
///
/// # Examples
///
/// ```
/// use u_facility::local_search::{ImprovementPolicy, LocalSearch};
/// use u_facility::models::{Customer, OpenSet, ProblemInstance, Warehouse};
/// use u_facility::neighborhood::Toggle;
///
/// let problem = ProblemInstance::new(
///     vec![Warehouse::new(1, 10.0), Warehouse::new(1, 20.0)],
///     vec![Customer::new(1, vec![5.0, 8.0]), Customer::new(1, vec![4.0, 6.0])],
/// )
/// .unwrap();
/// let ls = LocalSearch::new(&problem, ImprovementPolicy::Best);
/// let result = ls.descend(OpenSet::all_open(2), &Toggle);
/// assert_eq!(result.cost, 19.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch<'a> {
    evaluator: CostEvaluator<'a>,
    policy: ImprovementPolicy,
}

impl<'a> LocalSearch<'a> {
    pub fn new(problem: &'a ProblemInstance, policy: ImprovementPolicy) -> Self {
        Self {
            evaluator: CostEvaluator::new(problem),
            policy,
        }
    }

    pub fn policy(&self) -> ImprovementPolicy {
        self.policy
    }

    /// Descends from `start` in one neighborhood until no move improves.
    pub fn descend(&self, start: OpenSet, neighborhood: &dyn Neighborhood) -> DescentResult {
        let cost = self.evaluator.open_set_cost(&start);
        let mut state = DescentResult::start(start, cost);
        self.descend_in_place(&mut state, neighborhood);
        state
    }

    /// Runs each neighborhood to exhaustion in turn, repeating the whole
    /// cycle while any of them still improves.
    pub fn cycle(&self, start: OpenSet, neighborhoods: &[&dyn Neighborhood]) -> DescentResult {
        let cost = self.evaluator.open_set_cost(&start);
        let mut state = DescentResult::start(start, cost);
        loop {
            let mut improved = false;
            for neighborhood in neighborhoods {
                if self.descend_in_place(&mut state, *neighborhood) > 0 {
                    improved = true;
                }
            }
            if !improved {
                break;
            }
        }
        state
    }

    /// Returns the number of steps taken.
    fn descend_in_place(&self, state: &mut DescentResult, neighborhood: &dyn Neighborhood) -> usize {
        let mut taken = 0;
        while let Some((mv, cost)) = self.select_move(state, neighborhood) {
            mv.apply(&mut state.solution);
            state.cost = cost;
            state.steps += 1;
            state.cost_trace.push(cost);
            state.evaluation_trace.push(state.evaluations);
            state.moves.push(mv);
            taken += 1;
            log::trace!("{}: {:?} -> {cost}", neighborhood.name(), mv);
        }
        taken
    }

    fn select_move(
        &self,
        state: &mut DescentResult,
        neighborhood: &dyn Neighborhood,
    ) -> Option<(Move, f64)> {
        let mut chosen = None;
        let mut threshold = state.cost;
        for mv in neighborhood.moves(&state.solution) {
            let cost = self.evaluator.open_set_cost(&mv.applied_to(&state.solution));
            state.evaluations += 1;
            if improves(cost, threshold) {
                chosen = Some((mv, cost));
                threshold = cost;
                if self.policy == ImprovementPolicy::First {
                    break;
                }
            }
        }
        chosen
    }
}
