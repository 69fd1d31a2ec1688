//! The two solution forms and the solver output.
//!
//! [`OpenSet`] records which warehouses are open; each customer's service
//! cost is derived (cheapest open warehouse). [`Assignment`] records one
//! warehouse per customer explicitly; a warehouse is open iff it serves
//! somebody. Converting an open set to an assignment always goes through the
//! nearest-open-warehouse scan in [`evaluation`](crate::evaluation), so both
//! forms agree on cost.

use super::ProblemInstance;
use crate::evaluation::CostEvaluator;

/// Open-set solution form: one "is open" flag per warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenSet {
    open: Vec<bool>,
}

impl OpenSet {
    /// Every warehouse open.
    pub fn all_open(num_warehouses: usize) -> Self {
        Self {
            open: vec![true; num_warehouses],
        }
    }

    /// Every warehouse closed.
    pub fn all_closed(num_warehouses: usize) -> Self {
        Self {
            open: vec![false; num_warehouses],
        }
    }

    /// Wraps explicit flags.
    pub fn from_flags(open: Vec<bool>) -> Self {
        Self { open }
    }

    /// Builds a set with exactly the listed warehouses open.
    pub fn from_open_indices(num_warehouses: usize, indices: &[usize]) -> Self {
        let mut set = Self::all_closed(num_warehouses);
        for &w in indices {
            set.open[w] = true;
        }
        set
    }

    /// Number of warehouses covered by the set (open or not).
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[inline]
    pub fn is_open(&self, w: usize) -> bool {
        self.open[w]
    }

    pub fn set(&mut self, w: usize, open: bool) {
        self.open[w] = open;
    }

    pub fn toggle(&mut self, w: usize) {
        self.open[w] = !self.open[w];
    }

    /// Number of open warehouses.
    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// `true` when no warehouse is open (the degenerate, infinite-cost state).
    pub fn none_open(&self) -> bool {
        !self.open.iter().any(|&o| o)
    }

    /// Open warehouse indices, ascending.
    pub fn open_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.open
            .iter()
            .enumerate()
            .filter(|(_, &o)| o)
            .map(|(w, _)| w)
    }

    /// Closed warehouse indices, ascending.
    pub fn closed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.open
            .iter()
            .enumerate()
            .filter(|(_, &o)| !o)
            .map(|(w, _)| w)
    }

    pub fn as_flags(&self) -> &[bool] {
        &self.open
    }

    /// Assigns every customer to its cheapest open warehouse.
    ///
    /// Returns `None` when no warehouse is open.
    pub fn to_assignment(&self, problem: &ProblemInstance) -> Option<Assignment> {
        let nearest = CostEvaluator::new(problem).nearest_open(self);
        nearest
            .into_iter()
            .collect::<Option<Vec<usize>>>()
            .map(Assignment::new)
    }

    /// Solver output for this open set: nearest open warehouse per customer,
    /// `None` for customers that cannot be served.
    pub fn to_assignments(&self, problem: &ProblemInstance) -> Assignments {
        Assignments::from_warehouses(CostEvaluator::new(problem).nearest_open(self))
    }
}

/// Assignment solution form: the warehouse serving each customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    warehouse_of: Vec<usize>,
}

impl Assignment {
    pub fn new(warehouse_of: Vec<usize>) -> Self {
        Self { warehouse_of }
    }

    /// Every customer to the warehouse with its lowest allocation cost.
    pub fn greedy(problem: &ProblemInstance) -> Self {
        Self::new(
            (0..problem.num_customers())
                .map(|c| problem.cheapest_warehouse(c))
                .collect(),
        )
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.warehouse_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warehouse_of.is_empty()
    }

    #[inline]
    pub fn warehouse(&self, customer: usize) -> usize {
        self.warehouse_of[customer]
    }

    #[inline]
    pub fn set(&mut self, customer: usize, warehouse: usize) {
        self.warehouse_of[customer] = warehouse;
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.warehouse_of
    }

    /// Warehouses serving at least one customer.
    pub fn open_set(&self, num_warehouses: usize) -> OpenSet {
        let mut set = OpenSet::all_closed(num_warehouses);
        for &w in &self.warehouse_of {
            set.set(w, true);
        }
        set
    }

    /// Converts to solver output.
    pub fn to_assignments(&self) -> Assignments {
        Assignments::from_warehouses(self.warehouse_of.iter().map(|&w| Some(w)).collect())
    }
}

/// Solver output: one `(customer, warehouse)` pair per customer, in customer
/// order. `None` marks a customer that could not be assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignments {
    warehouses: Vec<Option<usize>>,
}

impl Assignments {
    pub fn from_warehouses(warehouses: Vec<Option<usize>>) -> Self {
        Self { warehouses }
    }

    pub fn len(&self) -> usize {
        self.warehouses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty()
    }

    /// Warehouse serving `customer`, if any.
    pub fn get(&self, customer: usize) -> Option<usize> {
        self.warehouses.get(customer).copied().flatten()
    }

    /// `(customer, warehouse)` pairs in customer order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.warehouses.iter().copied().enumerate()
    }

    /// Pairs with `-1` for unassigned customers, as written by the CLI and
    /// run logs.
    pub fn as_signed_pairs(&self) -> Vec<(i64, i64)> {
        self.pairs()
            .map(|(c, w)| (c as i64, w.map_or(-1, |w| w as i64)))
            .collect()
    }

    /// `true` when every customer has a warehouse.
    pub fn is_complete(&self) -> bool {
        self.warehouses.iter().all(Option::is_some)
    }

    /// The explicit assignment, if every customer is served.
    pub fn to_assignment(&self) -> Option<Assignment> {
        self.warehouses
            .iter()
            .copied()
            .collect::<Option<Vec<usize>>>()
            .map(Assignment::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Warehouse};

    fn small_problem() -> ProblemInstance {
        ProblemInstance::new(
            vec![Warehouse::new(10, 10.0), Warehouse::new(10, 20.0)],
            vec![
                Customer::new(1, vec![5.0, 8.0]),
                Customer::new(1, vec![4.0, 6.0]),
                Customer::new(1, vec![9.0, 6.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_open_set_indices() {
        let set = OpenSet::from_open_indices(4, &[1, 3]);
        assert_eq!(set.open_indices().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(set.closed_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(set.open_count(), 2);
        assert!(!set.none_open());
        assert!(OpenSet::all_closed(3).none_open());
    }

    #[test]
    fn test_to_assignment_uses_nearest_open() {
        let problem = small_problem();
        let both = OpenSet::all_open(2).to_assignment(&problem).unwrap();
        assert_eq!(both.as_slice(), &[0, 0, 1]);

        let only_one = OpenSet::from_open_indices(2, &[1])
            .to_assignment(&problem)
            .unwrap();
        assert_eq!(only_one.as_slice(), &[1, 1, 1]);
    }

    #[test]
    fn test_to_assignment_none_when_all_closed() {
        let problem = small_problem();
        assert!(OpenSet::all_closed(2).to_assignment(&problem).is_none());

        let out = OpenSet::all_closed(2).to_assignments(&problem);
        assert!(!out.is_complete());
        assert_eq!(out.as_signed_pairs(), vec![(0, -1), (1, -1), (2, -1)]);
    }

    #[test]
    fn test_assignment_open_set_round_trip() {
        let assignment = Assignment::new(vec![1, 1, 0]);
        let set = assignment.open_set(3);
        assert_eq!(set.as_flags(), &[true, true, false]);
    }

    #[test]
    fn test_greedy_assignment() {
        let problem = small_problem();
        assert_eq!(Assignment::greedy(&problem).as_slice(), &[0, 0, 1]);
    }

    #[test]
    fn test_assignments_pairs_in_customer_order() {
        let out = Assignment::new(vec![2, 0]).to_assignments();
        let pairs: Vec<_> = out.pairs().collect();
        assert_eq!(pairs, vec![(0, Some(2)), (1, Some(0))]);
        assert_eq!(out.get(1), Some(0));
        assert_eq!(out.get(5), None);
        assert_eq!(out.to_assignment().unwrap().as_slice(), &[2, 0]);
    }
}
