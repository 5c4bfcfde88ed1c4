//! The candidate tree extraction loop.

use std::sync::Arc;

use arbor_core::config::{ArborConfig, ExtractionMethod};
use arbor_core::constants::VERSION;
use arbor_core::errors::TreeError;
use arbor_core::{ArborError, ArborResult};
use arbor_graph::pruning::shortest_path_reduce;
use arbor_graph::{binarize, MetaGraph, RootedSubgraph, SubgraphPruner};
use arbor_sampler::{sampler_from_config, RootSampler};
use arbor_tree::{Arborescence, BudgetedTreeDp, LagrangianTreeSolver, VarianceCost};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One sampled root and the tree grown from it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateTree {
    pub root: String,
    pub tree: Option<Arborescence>,
}

/// Counts from one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub sampled: usize,
    pub trees: usize,
    /// Roots whose window held nothing affordable or reachable.
    pub empty: usize,
    pub failed: usize,
}

/// Drives sampler → solver → sampler feedback for a configured number of roots.
pub struct CandidateTreeGenerator {
    config: ArborConfig,
}

impl CandidateTreeGenerator {
    pub fn new(config: ArborConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArborConfig {
        &self.config
    }

    /// Extract candidate trees from `graph` with the configured sampler.
    pub fn run(&self, graph: MetaGraph) -> ArborResult<Vec<CandidateTree>> {
        self.run_with_report(graph).map(|(candidates, _)| candidates)
    }

    pub fn run_with_report(
        &self,
        graph: MetaGraph,
    ) -> ArborResult<(Vec<CandidateTree>, RunReport)> {
        self.config.validate()?;
        let count = self.config.sampling.candidate_budget(graph.node_count());
        let pruner = SubgraphPruner::new(self.config.extraction.timespan());
        info!(
            version = VERSION,
            nodes = graph.node_count(),
            candidates = count,
            budget = self.config.extraction.budget,
            "extraction run starting"
        );
        let mut sampler = sampler_from_config(
            &self.config.sampling,
            Arc::new(graph),
            pruner,
            self.config.extraction.budget,
        );
        Ok(self.drive(sampler.as_mut(), count))
    }

    /// Take up to `count` roots from `sampler`, extract from each and feed the
    /// outcome back. A failing root is logged and recorded without a tree.
    pub fn drive(
        &self,
        sampler: &mut dyn RootSampler,
        count: usize,
    ) -> (Vec<CandidateTree>, RunReport) {
        let _span = crate::run_span!(sampler.name(), count).entered();
        let mut candidates = Vec::with_capacity(count);
        let mut report = RunReport::default();

        while report.sampled < count {
            let Some(sample) = sampler.take() else {
                debug!(sampled = report.sampled, "sampler exhausted");
                break;
            };
            report.sampled += 1;

            let tree = match self.extract(&sample.subgraph) {
                Ok(Some(tree)) => {
                    report.trees += 1;
                    Some(tree)
                }
                Ok(None) => {
                    report.empty += 1;
                    None
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        root = %sample.root,
                        error = %e,
                        recoverable = e.is_recoverable(),
                        "extraction failed"
                    );
                    None
                }
            };
            sampler.update(&sample.root, tree.as_ref());
            candidates.push(CandidateTree {
                root: sample.root,
                tree,
            });
        }

        info!(
            sampled = report.sampled,
            trees = report.trees,
            empty = report.empty,
            failed = report.failed,
            "extraction run finished"
        );
        (candidates, report)
    }

    /// Grow the budgeted tree for one rooted subgraph. `Ok(None)` when the
    /// subgraph or the resulting tree has no edges.
    pub fn extract(&self, subgraph: &RootedSubgraph) -> ArborResult<Option<Arborescence>> {
        let extraction = &self.config.extraction;
        let _span = crate::extraction_span!(subgraph.root, extraction.method).entered();

        if subgraph.is_empty() {
            let error = TreeError::EmptySubgraph {
                root: subgraph.root.clone(),
            };
            debug!(error = %error, "skipping root");
            return Ok(None);
        }

        let reduced;
        let dag = if extraction.shortest_path {
            reduced = shortest_path_reduce(subgraph)?;
            &reduced
        } else {
            subgraph
        };

        let binary = binarize(&dag.graph);
        let tree = match extraction.method {
            ExtractionMethod::Lst => LagrangianTreeSolver::new(extraction.decimal_precision).solve(
                &binary,
                &dag.root,
                extraction.budget,
            )?,
            ExtractionMethod::Variance => {
                let cost = VarianceCost::new(Box::new(self.config.graph.distance));
                BudgetedTreeDp::new(extraction.fixed_point).solve(
                    &binary,
                    &dag.root,
                    extraction.budget,
                    &cost,
                )?
            }
        }
        .unbinarize();

        let tree = Arborescence::from_graph(tree.into_graph(), extraction.root_policy)?;
        if tree.root() != subgraph.root {
            return Err(ArborError::TreeError(TreeError::NotAnArborescence {
                reason: format!("tree rooted at {} instead of {}", tree.root(), subgraph.root),
            }));
        }
        debug!(
            nodes = tree.node_count(),
            cost = tree.total_cost(),
            prize = tree.total_prize(),
            "tree extracted"
        );
        Ok((!tree.is_empty()).then_some(tree))
    }
}
