//! Facility location domain model.
//!
//! - [`Warehouse`] / [`Customer`]: immutable instance data
//! - [`ProblemInstance`]: the validated instance all solvers read
//! - [`OpenSet`]: open-set solution form (one flag per warehouse)
//! - [`Assignment`]: assignment solution form (one warehouse per customer)
//! - [`Assignments`]: the `(customer, warehouse)` pairs every solver returns

mod customer;
mod problem;
mod solution;
mod warehouse;

pub use customer::Customer;
pub use problem::ProblemInstance;
pub use solution::{Assignment, Assignments, OpenSet};
pub use warehouse::Warehouse;
