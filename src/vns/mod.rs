//! Variable Neighborhood Search (VNS).
//!
//! Basic VNS over open sets: shake the current solution by `k` random
//! warehouse flips, descend with first-improvement toggles, and move only
//! on improvement. `k` grows on failure and returns to 1 on success.
//!
//! # References
//!
//! - Mladenović & Hansen (1997), "Variable neighborhood search"
//! - Hansen, Mladenović & Moreno Pérez (2010), "Variable neighbourhood search:
//!   methods and applications"

mod config;
mod runner;

pub use config::VnsConfig;
pub use runner::{NeighborhoodIndex, VnsResult, VnsRunner};
