//! Acyclicity and time-order checks over a meta-graph.

use arbor_core::errors::GraphError;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::meta_graph::MetaGraph;

/// Every strongly connected component with more than one node (i.e., cycles).
pub fn find_cycles(graph: &MetaGraph) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .collect()
}

pub fn is_acyclic(graph: &MetaGraph) -> bool {
    !petgraph::algo::is_cyclic_directed(&graph.graph)
}

/// Whether every edge goes from an earlier `(timestamp, id)` to a later one.
/// Dummy nodes share their parent's timestamp, so they are compared by time only.
pub fn respects_time_order(graph: &MetaGraph) -> bool {
    graph.graph.edge_references().all(|e| {
        let source = graph.node(e.source());
        let target = graph.node(e.target());
        if source.is_dummy() || target.is_dummy() {
            source.timestamp <= target.timestamp
        } else {
            (source.timestamp, source.id.as_str()) < (target.timestamp, target.id.as_str())
        }
    })
}

/// Nodes in topological order, parents before children.
pub fn topological_order(graph: &MetaGraph) -> Result<Vec<NodeIndex>, GraphError> {
    toposort(&graph.graph, None).map_err(|cycle| GraphError::CycleDetected {
        path: graph.node(cycle.node_id()).id.clone(),
    })
}

/// Nodes with no incoming edge, in index order.
pub fn roots(graph: &MetaGraph) -> Vec<NodeIndex> {
    graph
        .graph
        .node_indices()
        .filter(|&idx| {
            graph
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_none()
        })
        .collect()
}
