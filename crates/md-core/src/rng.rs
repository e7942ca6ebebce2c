//! Seeded RNG for generating random layouts.
//!
//! The simulation itself is not randomised; its nondeterminism comes from
//! thread scheduling.  `SimRng` exists so test fixtures and the demo can
//! produce reproducible starting layouts from a seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]; NaN counts as 0).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.0.gen_bool(p)
    }
}
