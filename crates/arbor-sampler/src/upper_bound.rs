use std::collections::VecDeque;

use arbor_tree::upper_bound;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::rooting::{RootSample, RootSampler, Rooting};

/// Node-count bound of every non-leaf root's subgraph under `budget`, sorted
/// by id. Roots are independent, so they are bounded in parallel.
pub fn upper_bounds(rooting: &Rooting, budget: f64) -> Vec<(String, usize)> {
    let roots = rooting.non_leaf_roots();
    let bounds: Vec<(String, usize)> = roots
        .into_par_iter()
        .filter_map(|root| {
            let subgraph = rooting.pruner().prune(rooting.graph(), &root).ok()?;
            match upper_bound(&subgraph.graph, &root, budget) {
                Ok(bound) => Some((root, bound)),
                Err(e) => {
                    warn!(root = %root, error = %e, "upper bound failed");
                    None
                }
            }
        })
        .collect();
    debug!(roots = bounds.len(), budget, "upper bounds computed");
    bounds
}

/// Visits non-leaf roots by decreasing upper bound (ties by id). Ignores feedback.
pub struct UpperBoundSampler {
    rooting: Rooting,
    queue: VecDeque<String>,
}

impl UpperBoundSampler {
    pub fn new(rooting: Rooting, budget: f64) -> Self {
        let mut ranked = upper_bounds(&rooting, budget);
        ranked.sort_by(|(ra, ba), (rb, bb)| bb.cmp(ba).then_with(|| ra.cmp(rb)));
        Self {
            rooting,
            queue: ranked.into_iter().map(|(root, _)| root).collect(),
        }
    }

    /// Roots still to visit, in visiting order.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }
}

impl RootSampler for UpperBoundSampler {
    fn take(&mut self) -> Option<RootSample> {
        while let Some(root) = self.queue.pop_front() {
            if let Some(sample) = self.rooting.sample(&root) {
                return Some(sample);
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "upperbound"
    }
}
