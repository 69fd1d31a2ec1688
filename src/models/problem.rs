//! Validated facility location instance.

use super::{Customer, Warehouse};
use crate::error::InstanceError;

/// An uncapacitated facility location instance.
///
/// Built once (by a parser or by hand) and read-only for the lifetime of a
/// solve call. Construction guarantees at least one warehouse, finite
/// non-negative fixed costs, and that every customer has exactly one finite
/// allocation cost per warehouse, so solvers never re-check any of these.
///
/// # Examples
///
/// ```
/// use u_facility::models::{Customer, ProblemInstance, Warehouse};
///
/// let problem = ProblemInstance::new(
///     vec![Warehouse::new(100, 10.0), Warehouse::new(100, 20.0)],
///     vec![
///         Customer::new(1, vec![5.0, 8.0]),
///         Customer::new(1, vec![4.0, 6.0]),
///     ],
/// )
/// .unwrap();
/// assert_eq!(problem.num_warehouses(), 2);
/// assert_eq!(problem.allocation_cost(1, 0), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProblemInstance {
    warehouses: Vec<Warehouse>,
    customers: Vec<Customer>,
}

impl ProblemInstance {
    /// Creates an instance, rejecting malformed cost tables.
    pub fn new(
        warehouses: Vec<Warehouse>,
        customers: Vec<Customer>,
    ) -> Result<Self, InstanceError> {
        if warehouses.is_empty() {
            return Err(InstanceError::NoWarehouses);
        }
        for (w, warehouse) in warehouses.iter().enumerate() {
            let value = warehouse.fixed_cost();
            if !value.is_finite() || value < 0.0 {
                return Err(InstanceError::InvalidFixedCost {
                    warehouse: w,
                    value,
                });
            }
        }
        for (j, customer) in customers.iter().enumerate() {
            let found = customer.allocation_costs().len();
            if found != warehouses.len() {
                return Err(InstanceError::CostRowLength {
                    customer: j,
                    expected: warehouses.len(),
                    found,
                });
            }
            if let Some((w, &value)) = customer
                .allocation_costs()
                .iter()
                .enumerate()
                .find(|(_, c)| !c.is_finite())
            {
                return Err(InstanceError::InvalidAllocationCost {
                    customer: j,
                    warehouse: w,
                    value,
                });
            }
        }
        Ok(Self {
            warehouses,
            customers,
        })
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn num_warehouses(&self) -> usize {
        self.warehouses.len()
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Fixed opening cost of warehouse `w`.
    #[inline]
    pub fn fixed_cost(&self, w: usize) -> f64 {
        self.warehouses[w].fixed_cost()
    }

    /// Cost of serving customer `c` from warehouse `w`.
    #[inline]
    pub fn allocation_cost(&self, c: usize, w: usize) -> f64 {
        self.customers[c].allocation_cost(w)
    }

    /// Index of the warehouse serving customer `c` most cheaply, ignoring
    /// fixed costs. Ties go to the lowest index.
    pub fn cheapest_warehouse(&self, c: usize) -> usize {
        let costs = self.customers[c].allocation_costs();
        let mut best = 0;
        for (w, &cost) in costs.iter().enumerate().skip(1) {
            if cost < costs[best] {
                best = w;
            }
        }
        best
    }
}
