//! # arbor-graph
//!
//! Turns ordered interactions into a causal meta-graph and provides the
//! per-root graph transformations that precede tree extraction:
//! time-windowed pruning, shortest-path reduction, and binarization.

pub mod binarize;
pub mod builder;
pub mod graph;
pub mod pruning;
pub mod snapshot;
pub mod weighting;

pub use binarize::{binarize, unbinarize};
pub use builder::MetaGraphBuilder;
pub use graph::{CostEdge, MessageNode, MetaGraph, NodeKind};
pub use pruning::{RootedSubgraph, SubgraphPruner};
pub use snapshot::GraphSnapshot;
pub use weighting::{EdgeWeighting, WeightingReport};
