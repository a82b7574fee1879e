//! Seeded randomness.
//!
//! Every random choice of a world goes through one `Pcg64`. Multi-world
//! runs draw each world's seed from a master generator, in world order.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

pub type WorldRng = Pcg64;

pub fn create_rng(seed: u64) -> WorldRng {
    Pcg64::seed_from_u64(seed)
}

/// One generator per world, derived from `seed`.
pub fn world_rngs(seed: u64, count: usize) -> Vec<WorldRng> {
    let mut master = create_rng(seed);
    (0..count)
        .map(|_| Pcg64::seed_from_u64(master.r#gen()))
        .collect()
}
