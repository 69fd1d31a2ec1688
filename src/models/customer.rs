//! Customer with per-warehouse service costs.

/// A customer and the cost of serving it from each warehouse.
///
/// `allocation_costs[w]` is the cost of assigning this customer to
/// warehouse `w`; the row is index-aligned with the instance's warehouses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    demand: u64,
    allocation_costs: Vec<f64>,
}

impl Customer {
    /// Creates a customer.
    pub fn new(demand: u64, allocation_costs: Vec<f64>) -> Self {
        Self {
            demand,
            allocation_costs,
        }
    }

    /// Demand as read from the instance.
    pub fn demand(&self) -> u64 {
        self.demand
    }

    /// Service cost for every warehouse.
    pub fn allocation_costs(&self) -> &[f64] {
        &self.allocation_costs
    }

    /// Service cost from warehouse `w`.
    #[inline]
    pub fn allocation_cost(&self, w: usize) -> f64 {
        self.allocation_costs[w]
    }
}
