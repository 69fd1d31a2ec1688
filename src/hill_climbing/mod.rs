//! Hill climbing: steepest descent over single-warehouse toggles.
//!
//! Starts with every warehouse open and repeatedly applies the best
//! improving toggle until none is left. Deterministic and parameter-free;
//! the baseline the randomized solvers are measured against.

mod runner;

pub use runner::{HillClimbingResult, HillClimbingRunner};
