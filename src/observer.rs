//! Per-iteration search events.
//!
//! Solvers report progress to a [`SearchObserver`]. Reporting is
//! fire-and-forget: observers return nothing and cannot influence the search.
//!
//! - [`NoopObserver`]: discards everything (the default)
//! - [`LogObserver`]: forwards events to the `log` facade at debug level
//! - [`RunLog`]: collects events and writes them as CSV for offline analysis

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One progress record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IterationEvent {
    /// Solver name, e.g. `"grasp"`.
    pub algorithm: &'static str,
    /// Iteration number within the run (solver-specific unit).
    pub iteration: usize,
    /// Cost evaluations performed so far.
    pub comparisons: u64,
    /// Warehouse touched by the step, if the step is a single-warehouse move.
    pub facility: Option<usize>,
    /// Customer touched by the step, if any.
    pub customer: Option<usize>,
    /// Number of open warehouses in the current solution.
    pub open_facilities: usize,
    /// Total cost of the current solution.
    pub cost: f64,
    /// Allocation part of the current cost (fixed costs excluded).
    pub assignment_cost: f64,
}

/// Receives progress events from a running solver.
pub trait SearchObserver {
    /// Whether events should be built at all. Solvers skip event
    /// construction when this returns `false`.
    fn enabled(&self) -> bool {
        true
    }

    /// Called once per reported iteration.
    fn on_iteration(&mut self, event: &IterationEvent);
}

/// Ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn enabled(&self) -> bool {
        false
    }

    fn on_iteration(&mut self, _event: &IterationEvent) {}
}

/// Forwards events to `log::debug!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn enabled(&self) -> bool {
        log::log_enabled!(log::Level::Debug)
    }

    fn on_iteration(&mut self, event: &IterationEvent) {
        log::debug!(
            "{} iter {}: cost {} (allocation {}), {} open, {} evaluations",
            event.algorithm,
            event.iteration,
            event.cost,
            event.assignment_cost,
            event.open_facilities,
            event.comparisons
        );
    }
}

/// In-memory run log, written out as CSV after the run.
///
/// # Examples
///
/// ```
/// use u_facility::observer::{IterationEvent, RunLog, SearchObserver};
///
/// let mut log = RunLog::new("cap71");
/// log.on_iteration(&IterationEvent {
///     algorithm: "vns",
///     iteration: 1,
///     comparisons: 10,
///     facility: Some(3),
///     customer: None,
///     open_facilities: 4,
///     cost: 120.5,
///     assignment_cost: 80.5,
/// });
/// let mut out = Vec::new();
/// log.write_csv_to(&mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.lines().nth(1).unwrap().starts_with("vns,cap71,1,10,3,-1,4,"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    problem_name: String,
    events: Vec<IterationEvent>,
}

impl RunLog {
    /// CSV header line.
    pub const HEADER: &'static str = "Algorithm,Problem,Iteration,Num_Comparisons,Facility_ID,Customer_ID,Open_Facility,Cost,Assignment_Cost";

    pub fn new(problem_name: impl Into<String>) -> Self {
        Self {
            problem_name: problem_name.into(),
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[IterationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Writes the header and one line per event.
    pub fn write_csv_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", Self::HEADER)?;
        for e in &self.events {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{}",
                e.algorithm,
                self.problem_name,
                e.iteration,
                e.comparisons,
                signed(e.facility),
                signed(e.customer),
                e.open_facilities,
                e.cost,
                e.assignment_cost
            )?;
        }
        Ok(())
    }

    /// Writes the log to `path`, replacing any existing file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_csv_to(&mut out)?;
        out.flush()
    }
}

impl SearchObserver for RunLog {
    fn on_iteration(&mut self, event: &IterationEvent) {
        self.events.push(event.clone());
    }
}

fn signed(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}
