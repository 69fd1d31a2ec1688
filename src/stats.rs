//! Search instrumentation returned alongside every solution.

use std::time::Duration;

/// Counters describing how a solver spent its effort.
///
/// Built by each run and returned in its result instead of being kept as
/// mutable solver state.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStatistics {
    /// Outer iterations: GRASP trials, SA inner iterations, descent steps for
    /// hill climbing, VNS outer passes.
    pub iterations: usize,
    /// Full cost evaluations (the "comparison count" of run logs). One unit
    /// is one customers x warehouses scan: an open-set cost, or for SA one
    /// tabu sweep or assignment cost.
    pub evaluations: u64,
    /// Times the best-known cost improved.
    pub improvements: usize,
    /// Candidate solutions accepted as the new current solution.
    pub accepted_moves: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Adds another run's counters to these (elapsed time included).
    pub fn absorb(&mut self, other: &SearchStatistics) {
        self.iterations += other.iterations;
        self.evaluations += other.evaluations;
        self.improvements += other.improvements;
        self.accepted_moves += other.accepted_moves;
        self.elapsed += other.elapsed;
    }
}
