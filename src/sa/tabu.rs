//! Tabu-restricted reassignment descent used to refine SA neighbors.

use crate::evaluation::{improves, CostEvaluator};
use crate::models::{Assignment, ProblemInstance};
use std::collections::{HashSet, VecDeque};

/// Recently chosen warehouses, oldest first.
#[derive(Debug, Clone, Default)]
pub struct TabuList {
    queue: VecDeque<usize>,
    members: HashSet<usize>,
    tenure: usize,
}

impl TabuList {
    pub fn new(tenure: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(tenure + 1),
            members: HashSet::with_capacity(tenure + 1),
            tenure,
        }
    }

    pub fn contains(&self, w: usize) -> bool {
        self.members.contains(&w)
    }

    /// Adds `w` unless already present, evicting the oldest entry once the
    /// list exceeds its tenure.
    pub fn push(&mut self, w: usize) {
        if !self.members.insert(w) {
            return;
        }
        self.queue.push_back(w);
        if self.queue.len() > self.tenure {
            if let Some(old) = self.queue.pop_front() {
                self.members.remove(&old);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Outcome of one refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabuOutcome {
    /// Total cost of the refined assignment, recomputed from scratch.
    pub cost: f64,
    /// Customers reassigned.
    pub moves: usize,
    /// Full customer sweeps performed.
    pub sweeps: usize,
}

/// Customer-by-customer reassignment with a warehouse tabu list.
///
/// A customer's current warehouse is charged its fixed cost only while that
/// warehouse is not tabu; every non-tabu alternative is charged allocation
/// plus fixed cost. When a cheaper alternative exists the customer moves to
/// the cheapest one and that warehouse becomes tabu. Sweeps repeat until
/// `max_stagnation_sweeps` consecutive sweeps move nobody.
///
/// `max_sweeps` caps the number of sweeps whatever the stagnation counter
/// says.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Assignment, Customer, ProblemInstance, Warehouse};
/// use u_facility::sa::TabuLocalSearch;
///
/// let problem = ProblemInstance::new(
///     vec![Warehouse::new(1, 10.0), Warehouse::new(1, 20.0)],
///     vec![Customer::new(1, vec![5.0, 8.0]), Customer::new(1, vec![4.0, 6.0])],
/// )
/// .unwrap();
/// let mut assignment = Assignment::new(vec![1, 1]);
/// let outcome = TabuLocalSearch::new(0, 20).refine(&problem, &mut assignment);
/// assert_eq!(assignment.as_slice(), &[0, 0]);
/// assert_eq!(outcome.cost, 19.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabuLocalSearch {
    pub tabu_tenure: usize,
    pub max_stagnation_sweeps: usize,
    pub max_sweeps: usize,
}

impl TabuLocalSearch {
    pub fn new(tabu_tenure: usize, max_stagnation_sweeps: usize) -> Self {
        Self {
            tabu_tenure,
            max_stagnation_sweeps,
            max_sweeps: 10_000,
        }
    }

    pub fn with_max_sweeps(mut self, n: usize) -> Self {
        self.max_sweeps = n;
        self
    }

    /// Refines `assignment` in place.
    pub fn refine(&self, problem: &ProblemInstance, assignment: &mut Assignment) -> TabuOutcome {
        let mut tabu = TabuList::new(self.tabu_tenure);
        let mut stagnant = 0usize;
        let mut sweeps = 0usize;
        let mut moves = 0usize;

        while stagnant < self.max_stagnation_sweeps && sweeps < self.max_sweeps {
            let mut moved = false;
            for (c, customer) in problem.customers().iter().enumerate() {
                let current = assignment.warehouse(c);
                let mut incumbent = customer.allocation_cost(current);
                if !tabu.contains(current) {
                    incumbent += problem.fixed_cost(current);
                }

                let mut target = None;
                for (w, &alloc) in customer.allocation_costs().iter().enumerate() {
                    if w == current || tabu.contains(w) {
                        continue;
                    }
                    let cost = alloc + problem.fixed_cost(w);
                    if improves(cost, incumbent) {
                        incumbent = cost;
                        target = Some(w);
                    }
                }

                if let Some(w) = target {
                    assignment.set(c, w);
                    tabu.push(w);
                    moves += 1;
                    moved = true;
                    log::trace!("tabu: customer {c} {current} -> {w}");
                }
            }
            sweeps += 1;
            if moved {
                stagnant = 0;
            } else {
                stagnant += 1;
            }
        }

        TabuOutcome {
            cost: CostEvaluator::new(problem).assignment_cost(assignment),
            moves,
            sweeps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Warehouse};

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
    fn test_tabu_list_fifo_eviction() {
        let mut tabu = TabuList::new(2);
        tabu.push(1);
        tabu.push(2);
        tabu.push(1);
        assert_eq!(tabu.len(), 2);
        tabu.push(3);
        assert!(!tabu.contains(1));
        assert!(tabu.contains(2));
        assert!(tabu.contains(3));
    }

    #[test]
    fn test_zero_tenure_keeps_nothing() {
        let mut tabu = TabuList::new(0);
        tabu.push(4);
        assert!(tabu.is_empty());
        assert!(!tabu.contains(4));
    }

    #[test]
    fn test_refine_reference_from_worst() {
        let problem = reference_problem();
        let mut assignment = Assignment::new(vec![1, 1, 1]);
        let outcome = TabuLocalSearch::new(6, 20).refine(&problem, &mut assignment);
        // Customer 0 moves to 0 (15 < 28); 0 is then tabu, so the others stay.
        assert_eq!(assignment.as_slice(), &[0, 1, 1]);
        assert_eq!(outcome.moves, 1);
        assert_eq!(outcome.cost, CostEvaluator::new(&problem).assignment_cost(&assignment));
        assert_eq!(outcome.cost, 50.0);
    }

    #[test]
    fn test_refine_without_tabu_reaches_nearest() {
        let problem = reference_problem();
        let mut assignment = Assignment::new(vec![1, 1, 1]);
        let outcome = TabuLocalSearch::new(0, 20).refine(&problem, &mut assignment);
        assert_eq!(assignment.as_slice(), &[0, 0, 0]);
        assert_eq!(outcome.cost, 25.0);
    }

    #[test]
    fn test_stagnation_bound() {
        let problem = reference_problem();
        let mut assignment = Assignment::new(vec![0, 0, 0]);
        let outcome = TabuLocalSearch::new(6, 3).refine(&problem, &mut assignment);
        assert_eq!(outcome.moves, 0);
        assert_eq!(outcome.sweeps, 3);
        assert_eq!(outcome.cost, 25.0);
    }

    #[test]
    fn test_zero_stagnation_does_nothing() {
        let problem = reference_problem();
        let mut assignment = Assignment::new(vec![1, 1, 1]);
        let outcome = TabuLocalSearch::new(6, 0).refine(&problem, &mut assignment);
        assert_eq!(outcome.sweeps, 0);
        assert_eq!(assignment.as_slice(), &[1, 1, 1]);
    }
}
