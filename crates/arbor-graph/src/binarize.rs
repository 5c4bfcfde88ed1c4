//! Rewrite a DAG so every node has at most two children, and undo it.
//!
//! A node with `k > 2` children keeps its cheapest child directly and hangs
//! the rest off a chain of `k - 2` dummy nodes:
//!
//! ```text
//! n ─ c1            n → c1, n → d1
//!  ├─ c2     =>     d1 → c2, d1 → d2
//!  ├─ c3            d2 → c3, d2 → c4
//!  └─ c4
//! ```
//!
//! Dummy edges cost nothing and dummies carry no prize, so every real path
//! keeps its prize and cost.

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::graph::{MessageNode, MetaGraph};

/// Children ordered by increasing cost, then id.
fn sorted_children(graph: &MetaGraph, node: NodeIndex) -> Vec<(NodeIndex, f64)> {
    let mut children = graph.children(node);
    children.sort_by(|(a, ca), (b, cb)| {
        ca.total_cmp(cb)
            .then_with(|| graph.node(*a).id.cmp(&graph.node(*b).id))
    });
    children
}

/// Binary-branching copy of `dag`. Node indices of real nodes are preserved.
pub fn binarize(dag: &MetaGraph) -> MetaGraph {
    let mut out = MetaGraph::new();
    for idx in dag.graph.node_indices() {
        out.add_node(dag.node(idx).clone());
    }

    let mut dummies = 0usize;
    for idx in dag.graph.node_indices() {
        let children = sorted_children(dag, idx);
        let k = children.len();
        if k <= 2 {
            for (child, cost) in children {
                out.add_edge(idx, child, cost);
            }
            continue;
        }

        let parent_node = dag.node(idx);
        let mut parent = idx;
        out.add_edge(parent, children[0].0, children[0].1);
        for (ordinal, &(child, cost)) in children.iter().enumerate().take(k - 1).skip(1) {
            let dummy = out.add_node(MessageNode::dummy(parent_node, ordinal));
            out.add_edge(parent, dummy, 0.0);
            out.add_edge(dummy, child, cost);
            parent = dummy;
            dummies += 1;
        }
        let (last, cost) = children[k - 1];
        out.add_edge(parent, last, cost);
    }

    debug!(
        nodes = dag.node_count(),
        dummies,
        edges = out.edge_count(),
        "binarized dag"
    );
    out
}

/// Collapse dummy chains: for every real node `u` and every real node `v`
/// reachable from `u` through dummies only, add `u → v` with the summed cost.
/// Dummies are dropped.
pub fn unbinarize(graph: &MetaGraph) -> MetaGraph {
    let mut out = MetaGraph::new();
    for node in graph.graph.node_weights() {
        if !node.is_dummy() {
            out.add_node(node.clone());
        }
    }

    for idx in graph.graph.node_indices() {
        let node = graph.node(idx);
        if node.is_dummy() {
            continue;
        }
        let mut stack: Vec<(NodeIndex, f64)> = graph.children(idx);
        while let Some((current, acc)) = stack.pop() {
            let current_node = graph.node(current);
            if current_node.is_dummy() {
                for (child, cost) in graph.children(current) {
                    stack.push((child, acc + cost));
                }
            } else {
                out.add_edge_by_id(&node.id, &current_node.id, acc);
            }
        }
    }
    out
}
