use std::collections::VecDeque;

use crate::rooting::{RootSample, RootSampler, Rooting};

/// Replays a caller-supplied list of roots in order.
pub struct DeterministicSampler {
    rooting: Rooting,
    roots: VecDeque<String>,
}

impl DeterministicSampler {
    pub fn new(rooting: Rooting, roots: impl IntoIterator<Item = String>) -> Self {
        Self {
            rooting,
            roots: roots.into_iter().collect(),
        }
    }
}

impl RootSampler for DeterministicSampler {
    fn take(&mut self) -> Option<RootSample> {
        while let Some(root) = self.roots.pop_front() {
            if let Some(sample) = self.rooting.sample(&root) {
                return Some(sample);
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "deterministic"
    }
}
