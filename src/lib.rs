//! Local-search metaheuristics for the Uncapacitated Facility Location
//! Problem (UFLP).
//!
//! Given candidate warehouses (each with a fixed opening cost) and customers
//! (each with a cost to be served by every warehouse), choose warehouses to
//! open and assign every customer to an open one, minimizing fixed plus
//! allocation cost.
//!
//! - **GRASP**: randomized greedy construction with a restricted candidate
//!   list, followed by close / open / swap local search, repeated.
//! - **Simulated Annealing (SA)**: geometric cooling over customer
//!   assignments, each neighbor refined by a tabu-restricted descent.
//! - **Hill Climbing**: steepest descent over single-warehouse toggles from
//!   the all-open solution.
//! - **Variable Neighborhood Search (VNS)**: k-flip shaking with
//!   first-improvement toggle descent.
//!
//! All solvers share one cost model ([`evaluation`]), one set of
//! neighborhood operators ([`neighborhood`]) and one descent engine
//! ([`local_search`]). [`solver::Algorithm`] selects among them behind the
//! [`solver::Solver`] trait.
//!
//! # Example
//!
//! ```
//! use u_facility::models::{Customer, ProblemInstance, Warehouse};
//! use u_facility::solver::{Algorithm, Solver};
//! use u_facility::vns::VnsConfig;
//!
//! let problem = ProblemInstance::new(
//!     vec![Warehouse::new(100, 10.0), Warehouse::new(100, 20.0)],
//!     vec![
//!         Customer::new(1, vec![5.0, 8.0]),
//!         Customer::new(1, vec![4.0, 6.0]),
//!         Customer::new(1, vec![6.0, 9.0]),
//!     ],
//! )
//! .unwrap();
//!
//! let solved = Algorithm::Vns(VnsConfig::default().with_seed(42)).solve(&problem);
//! assert_eq!(solved.cost, 25.0);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): GRASP evaluates construction candidates with rayon.
//! - `serde`: `Serialize`/`Deserialize` for configs, models and results.
//! - `cli`: builds the `uflp` command-line tool.

pub mod error;
pub mod evaluation;
pub mod grasp;
pub mod hill_climbing;
pub mod io;
pub mod local_search;
pub mod models;
pub mod neighborhood;
pub mod observer;
pub mod random;
pub mod sa;
pub mod solver;
pub mod stats;
pub mod vns;
