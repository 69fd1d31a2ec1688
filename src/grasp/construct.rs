//! Greedy randomized construction.

use crate::evaluation::{improves, CostEvaluator, INFEASIBLE_COST};
use crate::models::OpenSet;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Open set produced by one construction pass.
#[derive(Debug, Clone)]
pub struct Construction {
    pub open: OpenSet,
    pub cost: f64,
    /// Warehouses opened, in order.
    pub opened: Vec<usize>,
    pub evaluations: u64,
}

/// Cost of opening each closed warehouse on top of `current`.
///
/// Slot `w` holds the cost of `current + {w}`, or `None` when `w` is
/// already open. Each candidate is evaluated on its own copy of the open set,
/// so parallel workers share nothing mutable and write only their own slot.
pub fn marginal_costs(
    evaluator: &CostEvaluator<'_>,
    current: &OpenSet,
    parallel: bool,
) -> Vec<Option<f64>> {
    let evaluate = |w: usize| -> Option<f64> {
        if current.is_open(w) {
            return None;
        }
        let mut snapshot = current.clone();
        snapshot.set(w, true);
        Some(evaluator.open_set_cost(&snapshot))
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return (0..current.len()).into_par_iter().map(&evaluate).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..current.len()).map(evaluate).collect()
}

/// Builds an open set from scratch with a restricted candidate list.
///
/// Each step opens one closed warehouse whose cost falls within
/// `[min, min + alpha * (max - min)]` of the candidates that still improve on
/// the construction's cost, chosen uniformly. Stops when no candidate
/// improves. The first step always opens something when the instance has a
/// warehouse, since any finite cost improves on [`INFEASIBLE_COST`].
pub fn construct<R: Rng>(
    evaluator: &CostEvaluator<'_>,
    alpha: f64,
    parallel: bool,
    rng: &mut R,
) -> Construction {
    let num_warehouses = evaluator.problem().num_warehouses();
    let mut open = OpenSet::all_closed(num_warehouses);
    let mut cost = INFEASIBLE_COST;
    let mut opened = Vec::new();
    let mut evaluations = 0u64;

    loop {
        let costs = marginal_costs(evaluator, &open, parallel);
        let candidates: Vec<(usize, f64)> = costs
            .iter()
            .enumerate()
            .filter_map(|(w, c)| c.map(|c| (w, c)))
            .inspect(|_| evaluations += 1)
            .filter(|&(_, c)| improves(c, cost))
            .collect();

        if candidates.is_empty() {
            break;
        }

        let min = candidates.iter().map(|&(_, c)| c).fold(f64::INFINITY, f64::min);
        let max = candidates.iter().map(|&(_, c)| c).fold(f64::NEG_INFINITY, f64::max);
        let threshold = min + alpha * (max - min);
        let rcl: Vec<(usize, f64)> = candidates
            .into_iter()
            .filter(|&(_, c)| c <= threshold)
            .collect();

        let (w, c) = rcl[rng.random_range(0..rcl.len())];
        open.set(w, true);
        cost = c;
        opened.push(w);
        log::trace!("grasp construct: open {w} -> {c} ({} candidates)", rcl.len());
    }

    Construction {
        open,
        cost,
        opened,
        evaluations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, ProblemInstance, Warehouse};
    use crate::random::create_rng;
    use proptest::prelude::*;

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

    #[test]
    fn test_marginal_costs_skip_open() {
        let problem = reference_problem();
        let eval = CostEvaluator::new(&problem);
        let costs = marginal_costs(&eval, &OpenSet::all_closed(2), false);
        assert_eq!(costs, vec![Some(25.0), Some(43.0)]);

        let costs = marginal_costs(&eval, &OpenSet::from_open_indices(2, &[0]), false);
        assert_eq!(costs, vec![None, Some(45.0)]);
    }

    #[test]
    fn test_marginal_costs_parallel_matches_sequential() {
        let problem = reference_problem();
        let eval = CostEvaluator::new(&problem);
        let start = OpenSet::all_closed(2);
        assert_eq!(
            marginal_costs(&eval, &start, true),
            marginal_costs(&eval, &start, false)
        );
    }

    #[test]
    fn test_greedy_construction_on_reference() {
        let problem = reference_problem();
        let eval = CostEvaluator::new(&problem);
        let mut rng = create_rng(1);
        let result = construct(&eval, 0.0, false, &mut rng);
        // Opening 0 gives 25; adding 1 would give 45, so construction stops.
        assert_eq!(result.open, OpenSet::from_open_indices(2, &[0]));
        assert_eq!(result.cost, 25.0);
        assert_eq!(result.opened, vec![0]);
        assert_eq!(result.evaluations, 3);
    }

    #[test]
    fn test_construction_leaves_input_untouched_per_step() {
        let problem = reference_problem();
        let eval = CostEvaluator::new(&problem);
        let current = OpenSet::from_open_indices(2, &[1]);
        let before = current.clone();
        let _ = marginal_costs(&eval, &current, true);
        assert_eq!(current, before);
    }

    fn instance() -> impl Strategy<Value = ProblemInstance> {
        (1usize..6, 0usize..8).prop_flat_map(|(w, c)| {
            (
                prop::collection::vec(0.0f64..100.0, w),
                prop::collection::vec(prop::collection::vec(0.0f64..100.0, w), c),
            )
                .prop_map(|(fixed, rows)| {
                    let warehouses = fixed.into_iter().map(|f| Warehouse::new(1, f)).collect();
                    let customers = rows.into_iter().map(|r| Customer::new(1, r)).collect();
                    ProblemInstance::new(warehouses, customers).unwrap()
                })
        })
    }

    proptest! {
        #[test]
        fn prop_construction_never_empty(problem in instance(), alpha in 0.0f64..=1.0, seed in any::<u64>()) {
            let eval = CostEvaluator::new(&problem);
            let mut rng = create_rng(seed);
            let result = construct(&eval, alpha, false, &mut rng);
            prop_assert!(!result.open.none_open());
            prop_assert!(result.cost.is_finite());
            prop_assert!((result.cost - eval.open_set_cost(&result.open)).abs() < 1e-9);
        }
    }
}
