//! Candidate warehouse.

/// A candidate warehouse with its fixed opening cost.
///
/// `capacity` is carried from the instance file but is not enforced by the
/// uncapacitated solvers in this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warehouse {
    capacity: u64,
    fixed_cost: f64,
}

impl Warehouse {
    /// Creates a warehouse.
    pub fn new(capacity: u64, fixed_cost: f64) -> Self {
        Self {
            capacity,
            fixed_cost,
        }
    }

    /// Capacity as read from the instance.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Cost paid once if the warehouse is opened.
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }
}
