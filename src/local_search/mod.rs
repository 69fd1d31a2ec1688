//! Descent over open sets.
//!
//! [`LocalSearch`] walks from a starting [`OpenSet`](crate::models::OpenSet)
//! to a local optimum of one or more [`Neighborhood`](crate::neighborhood::Neighborhood)s.
//! Hill climbing and VNS use a single toggle descent; GRASP cycles through
//! close / open / swap operators.

mod engine;

pub use engine::{DescentResult, ImprovementPolicy, LocalSearch};
