use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::rooting::{RootSample, RootSampler, Rooting};

/// Draws roots uniformly among nodes not drawn yet. Seeded, so a run is
/// reproducible.
pub struct RandomSampler {
    rooting: Rooting,
    remaining: Vec<String>,
    rng: ChaCha8Rng,
}

impl RandomSampler {
    pub fn new(rooting: Rooting, seed: u64) -> Self {
        let mut remaining: Vec<String> = rooting.graph().ids().map(str::to_string).collect();
        remaining.sort();
        Self {
            rooting,
            remaining,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl RootSampler for RandomSampler {
    fn take(&mut self) -> Option<RootSample> {
        while !self.remaining.is_empty() {
            let i = self.rng.gen_range(0..self.remaining.len());
            let root = self.remaining.swap_remove(i);
            if let Some(sample) = self.rooting.sample(&root) {
                return Some(sample);
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
