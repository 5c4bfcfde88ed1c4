//! Explore/exploit root sampling.
//!
//! Exploration visits roots no extracted tree has covered yet, best upper
//! bound first. Exploitation revisits the node that scored highest inside
//! an earlier tree. The chance to explore is the fraction of non-leaf nodes
//! still uncovered, so the sampler drifts towards exploitation as trees
//! accumulate and exploits only once everything is covered.

use std::collections::{BTreeSet, HashMap, HashSet};

use arbor_core::errors::SamplerError;
use arbor_core::INodeScorer;
use arbor_tree::Arborescence;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::rooting::{RootSample, RootSampler, Rooting};
use crate::scoring::node_scores_from_tree;
use crate::upper_bound::upper_bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Explore,
    Exploit,
}

pub struct AdaptiveSampler {
    rooting: Rooting,
    scorer: Box<dyn INodeScorer>,
    rng: ChaCha8Rng,
    root_to_upper_bound: HashMap<String, usize>,
    /// Non-leaf nodes already inside some extracted tree.
    covered_nodes: HashSet<String>,
    /// Non-leaf nodes not covered yet. Only ever shrinks.
    roots_to_explore: BTreeSet<String>,
    /// Running max of each node's subtree score across extracted trees.
    node_to_score: HashMap<String, f64>,
    n_nodes_to_cover: usize,
}

impl AdaptiveSampler {
    pub fn new(rooting: Rooting, budget: f64, scorer: Box<dyn INodeScorer>, seed: u64) -> Self {
        let root_to_upper_bound: HashMap<String, usize> =
            upper_bounds(&rooting, budget).into_iter().collect();
        let roots_to_explore: BTreeSet<String> = rooting.non_leaf_roots().into_iter().collect();
        let n_nodes_to_cover = roots_to_explore.len();
        Self {
            rooting,
            scorer,
            rng: ChaCha8Rng::seed_from_u64(seed),
            root_to_upper_bound,
            covered_nodes: HashSet::new(),
            roots_to_explore,
            node_to_score: HashMap::new(),
            n_nodes_to_cover,
        }
    }

    /// Fraction of non-leaf nodes not yet covered by any tree.
    pub fn explore_proba(&self) -> f64 {
        if self.n_nodes_to_cover == 0 {
            return 0.0;
        }
        self.roots_to_explore.len() as f64 / self.n_nodes_to_cover as f64
    }

    pub fn roots_to_explore(&self) -> impl Iterator<Item = &str> {
        self.roots_to_explore.iter().map(String::as_str)
    }

    pub fn is_covered(&self, id: &str) -> bool {
        self.covered_nodes.contains(id)
    }

    pub fn score(&self, id: &str) -> Option<f64> {
        self.node_to_score.get(id).copied()
    }

    fn draw_action(&mut self) -> Action {
        if self.rng.gen::<f64>() < self.explore_proba() {
            Action::Explore
        } else {
            Action::Exploit
        }
    }

    /// Uncovered root with the highest upper bound, ties to the smaller id.
    fn explore_candidate(&self) -> Option<String> {
        self.roots_to_explore
            .iter()
            .max_by(|a, b| {
                let ba = self.root_to_upper_bound.get(*a).copied().unwrap_or(0);
                let bb = self.root_to_upper_bound.get(*b).copied().unwrap_or(0);
                ba.cmp(&bb).then_with(|| b.cmp(a))
            })
            .cloned()
    }

    /// Highest-scoring node, ties to the smaller id.
    fn exploit_candidate(&self) -> Option<String> {
        self.node_to_score
            .iter()
            .max_by(|(ia, sa), (ib, sb)| sa.total_cmp(sb).then_with(|| ib.cmp(ia)))
            .map(|(id, _)| id.clone())
    }

    fn cover(&mut self, id: &str) {
        self.covered_nodes.insert(id.to_string());
        self.roots_to_explore.remove(id);
    }
}

impl RootSampler for AdaptiveSampler {
    fn take(&mut self) -> Option<RootSample> {
        loop {
            let action = self.draw_action();
            let (first, second) = match action {
                Action::Explore => (self.explore_candidate(), self.exploit_candidate()),
                Action::Exploit => (self.exploit_candidate(), self.explore_candidate()),
            };
            let Some(root) = first.or(second) else {
                let err = SamplerError::NoCandidateAvailable {
                    sampler: self.name().to_string(),
                };
                info!(error = %err, "adaptive sampler exhausted");
                return None;
            };
            debug!(
                root = %root,
                ?action,
                explore_proba = self.explore_proba(),
                "adaptive pick"
            );
            if let Some(sample) = self.rooting.sample(&root) {
                return Some(sample);
            }
            // Unusable root: retire it so the loop makes progress.
            self.node_to_score.remove(&root);
            self.cover(&root);
        }
    }

    fn update(&mut self, root: &str, tree: Option<&Arborescence>) {
        self.node_to_score.remove(root);

        let Some(tree) = tree.filter(|t| !t.is_empty()) else {
            self.cover(root);
            return;
        };

        for (node, score) in node_scores_from_tree(tree, self.scorer.as_ref()) {
            if node == root {
                continue;
            }
            self.node_to_score
                .entry(node)
                .and_modify(|s| *s = s.max(score))
                .or_insert(score);
        }

        for node in tree.non_leaf_ids() {
            self.cover(&node);
        }
    }

    fn name(&self) -> &'static str {
        "adaptive"
    }
}
