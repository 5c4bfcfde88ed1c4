//! The sampler trait and the shared root → subgraph step.

use std::sync::Arc;

use arbor_graph::{MetaGraph, RootedSubgraph, SubgraphPruner};
use arbor_tree::Arborescence;
use tracing::warn;

/// A root chosen by a sampler, with its pruned subgraph.
#[derive(Debug, Clone)]
pub struct RootSample {
    pub root: String,
    pub subgraph: RootedSubgraph,
}

/// Hands out roots one at a time. `None` from [`take`](Self::take) means the
/// sampler is exhausted.
pub trait RootSampler: Send {
    fn take(&mut self) -> Option<RootSample>;

    /// Feedback after extracting from `root`. `None` means no tree was found.
    fn update(&mut self, _root: &str, _tree: Option<&Arborescence>) {}

    fn name(&self) -> &'static str;
}

/// Shared graph plus the pruner that cuts per-root subgraphs from it.
#[derive(Debug, Clone)]
pub struct Rooting {
    graph: Arc<MetaGraph>,
    pruner: SubgraphPruner,
}

impl Rooting {
    pub fn new(graph: Arc<MetaGraph>, pruner: SubgraphPruner) -> Self {
        Self { graph, pruner }
    }

    pub fn graph(&self) -> &MetaGraph {
        &self.graph
    }

    pub fn pruner(&self) -> &SubgraphPruner {
        &self.pruner
    }

    /// Ids of nodes with at least one child, sorted.
    pub fn non_leaf_roots(&self) -> Vec<String> {
        let mut roots = self.graph.non_leaf_ids();
        roots.sort();
        roots
    }

    /// Prune the subgraph for `root`. Unknown roots are logged and skipped.
    pub fn sample(&self, root: &str) -> Option<RootSample> {
        match self.pruner.prune(&self.graph, root) {
            Ok(subgraph) => Some(RootSample {
                root: root.to_string(),
                subgraph,
            }),
            Err(e) => {
                warn!(root, error = %e, "skipping root");
                None
            }
        }
    }
}
