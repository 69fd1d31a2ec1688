//! Simulated Annealing (SA) with tabu-restricted refinement.
//!
//! Works on explicit customer assignments. Each inner iteration perturbs the
//! current assignment, refines the result with a tabu-restricted
//! reassignment descent, and accepts it by the Metropolis rule. Temperature
//! falls geometrically; every few levels the chain restarts from a
//! perturbation of the best assignment found so far.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Glover (1989), "Tabu Search, Part I"

mod config;
mod runner;
mod tabu;

pub use config::{InitialAssignment, NeighborMove, SaConfig};
pub use runner::{metropolis_accept, SaResult, SaRunner};
pub use tabu::{TabuList, TabuLocalSearch, TabuOutcome};
