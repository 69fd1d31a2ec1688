//! Seeded random sources.
//!
//! Every solver draws from an explicit generator built here (or injected by
//! the caller), never from a global one, so a fixed seed reproduces a run.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator for an optional configured seed; `None` draws a fresh seed.
pub(crate) fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
