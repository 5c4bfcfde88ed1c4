pub mod dag_enforcement;
pub mod meta_graph;

pub use meta_graph::{CostEdge, MessageNode, MetaGraph, NodeKind};
