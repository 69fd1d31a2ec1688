//! Random perturbation operators.

use crate::models::{Assignment, OpenSet};
use rand::Rng;

/// Flips `k` warehouses drawn uniformly with replacement.
///
/// Drawing the same index twice flips it back, so the result may differ
/// from `solution` in fewer than `k` positions.
pub fn shake<R: Rng>(solution: &OpenSet, k: usize, rng: &mut R) -> OpenSet {
    let mut shaken = solution.clone();
    if shaken.is_empty() {
        return shaken;
    }
    for _ in 0..k {
        let w = rng.random_range(0..shaken.len());
        shaken.toggle(w);
    }
    shaken
}

/// Reassigns `count` distinct customers, chosen uniformly, to uniformly
/// random warehouses.
///
/// `count` is clamped to the number of customers.
pub fn reassign_random<R: Rng>(
    assignment: &Assignment,
    count: usize,
    num_warehouses: usize,
    rng: &mut R,
) -> Assignment {
    let mut next = assignment.clone();
    let count = count.min(next.len());
    if count == 0 || num_warehouses == 0 {
        return next;
    }
    for c in rand::seq::index::sample(rng, next.len(), count).into_iter() {
        next.set(c, rng.random_range(0..num_warehouses));
    }
    next
}

/// Moves one random customer to a different random warehouse.
///
/// With a single warehouse there is nowhere to move and the assignment is
/// returned unchanged.
pub fn reassign_single<R: Rng>(
    assignment: &Assignment,
    num_warehouses: usize,
    rng: &mut R,
) -> Assignment {
    let mut next = assignment.clone();
    if next.is_empty() || num_warehouses < 2 {
        return next;
    }
    let c = rng.random_range(0..next.len());
    let current = next.warehouse(c);
    // Draw from the other W - 1 warehouses.
    let mut w = rng.random_range(0..num_warehouses - 1);
    if w >= current {
        w += 1;
    }
    next.set(c, w);
    next
}
