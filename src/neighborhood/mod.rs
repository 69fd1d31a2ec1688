//! Neighborhood operators.
//!
//! Deterministic operators enumerate every [`Move`] one step away from an
//! [`OpenSet`], in ascending warehouse-index order so that first-improvement
//! descents are reproducible:
//!
//! - [`Toggle`]: flip one warehouse
//! - [`CloseOne`]: close one open warehouse
//! - [`OpenOne`]: open one closed warehouse
//! - [`SwapOpenClosed`]: open one closed warehouse and close one open one
//!
//! Random operators live in [`perturb`]: k-flip shaking for open sets and
//! random customer reassignment for assignments.

pub mod perturb;

pub use perturb::{reassign_random, reassign_single, shake};

use crate::models::OpenSet;

/// A single change to an open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Flip warehouse `w`.
    Toggle(usize),
    /// Open warehouse `w`.
    Open(usize),
    /// Close warehouse `w`.
    Close(usize),
    /// Open `open` and close `close` together.
    Swap { open: usize, close: usize },
}

impl Move {
    /// Applies the move in place.
    pub fn apply(self, solution: &mut OpenSet) {
        match self {
            Move::Toggle(w) => solution.toggle(w),
            Move::Open(w) => solution.set(w, true),
            Move::Close(w) => solution.set(w, false),
            Move::Swap { open, close } => {
                solution.set(open, true);
                solution.set(close, false);
            }
        }
    }

    /// Returns a copy of `solution` with the move applied.
    pub fn applied_to(self, solution: &OpenSet) -> OpenSet {
        let mut next = solution.clone();
        self.apply(&mut next);
        next
    }

    /// The warehouse whose state the move changes first (the opened one for
    /// swaps).
    pub fn facility(self) -> usize {
        match self {
            Move::Toggle(w) | Move::Open(w) | Move::Close(w) => w,
            Move::Swap { open, .. } => open,
        }
    }
}

/// Enumerates the moves one step away from a solution.
pub trait Neighborhood: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// All moves from `solution`, in a fixed order (ascending warehouse
    /// index, outer loop first for pair moves).
    fn moves(&self, solution: &OpenSet) -> Vec<Move>;
}

/// Flip any single warehouse.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toggle;

impl Neighborhood for Toggle {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn moves(&self, solution: &OpenSet) -> Vec<Move> {
        (0..solution.len()).map(Move::Toggle).collect()
    }
}

/// Close any open warehouse.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseOne;

impl Neighborhood for CloseOne {
    fn name(&self) -> &'static str {
        "close"
    }

    fn moves(&self, solution: &OpenSet) -> Vec<Move> {
        solution.open_indices().map(Move::Close).collect()
    }
}

/// Open any closed warehouse.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOne;

impl Neighborhood for OpenOne {
    fn name(&self) -> &'static str {
        "open"
    }

    fn moves(&self, solution: &OpenSet) -> Vec<Move> {
        solution.closed_indices().map(Move::Open).collect()
    }
}

/// Open a closed warehouse while closing an open one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapOpenClosed;

impl Neighborhood for SwapOpenClosed {
    fn name(&self) -> &'static str {
        "swap"
    }

    fn moves(&self, solution: &OpenSet) -> Vec<Move> {
        let open: Vec<usize> = solution.open_indices().collect();
        solution
            .closed_indices()
            .flat_map(|to_open| {
                open.iter().map(move |&to_close| Move::Swap {
                    open: to_open,
                    close: to_close,
                })
            })
            .collect()
    }
}
