//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! Each trial builds an open set from scratch by repeatedly opening a
//! warehouse drawn from a restricted candidate list of the cheapest
//! improving openings, then descends with close / open / swap operators.
//! The best open set over all trials is kept.
//!
//! Candidate openings are evaluated concurrently (rayon) on private copies
//! of the current open set.
//!
//! # References
//!
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"
//! - Resende & Ribeiro (2016), "Optimization by GRASP"

mod config;
mod construct;
mod runner;

pub use config::GraspConfig;
pub use construct::{construct, marginal_costs, Construction};
pub use runner::{GraspResult, GraspRunner};
