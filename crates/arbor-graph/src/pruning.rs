//! Time-windowed rooted subgraphs and shortest-path reduction.

use std::collections::{HashSet, VecDeque};

use arbor_core::errors::GraphError;
use chrono::{DateTime, Duration, Utc};
use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::graph::{dag_enforcement, MetaGraph};

/// A meta-graph restricted to what one root can reach inside its time window.
/// Owned by a single extraction; the source graph is never touched.
#[derive(Debug, Clone)]
pub struct RootedSubgraph {
    pub root: String,
    pub graph: MetaGraph,
}

impl RootedSubgraph {
    /// No edges means no tree can be grown from this root.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn root_index(&self) -> Option<NodeIndex> {
        self.graph.get_node(&self.root)
    }
}

/// Restricts a shared meta-graph to per-root subgraphs.
#[derive(Debug, Clone, Copy)]
pub struct SubgraphPruner {
    timespan: Duration,
}

impl SubgraphPruner {
    pub fn new(timespan: Duration) -> Self {
        Self { timespan }
    }

    pub fn timespan(&self) -> Duration {
        self.timespan
    }

    /// Nodes reachable from `root` whose timestamp lies in
    /// `[t_root, t_root + timespan]`, and every edge among them.
    /// Nodes outside the window are not traversed through.
    pub fn prune(&self, graph: &MetaGraph, root: &str) -> Result<RootedSubgraph, GraphError> {
        let start = graph.get_node(root).ok_or_else(|| GraphError::NodeNotFound {
            id: root.to_string(),
        })?;
        let t0 = graph.node(start).timestamp;
        // A window reaching past the calendar range is unbounded.
        let deadline = t0
            .checked_add_signed(self.timespan)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut visited = HashSet::new();
        visited.insert(start);
        let mut order = vec![start];
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in graph.graph.neighbors_directed(current, Direction::Outgoing) {
                if visited.contains(&neighbor) {
                    continue;
                }
                let ts = graph.node(neighbor).timestamp;
                if ts < t0 || ts > deadline {
                    continue;
                }
                visited.insert(neighbor);
                order.push(neighbor);
                queue.push_back(neighbor);
            }
        }

        Ok(RootedSubgraph {
            root: root.to_string(),
            graph: graph.induced(&order),
        })
    }
}

/// Keep, for each node, only the incoming edge on its cheapest path from the
/// root (ties go to the lower node index). The result is a tree-shaped DAG.
pub fn shortest_path_reduce(subgraph: &RootedSubgraph) -> Result<RootedSubgraph, GraphError> {
    let graph = &subgraph.graph;
    let root = graph
        .get_node(&subgraph.root)
        .ok_or_else(|| GraphError::NodeNotFound {
            id: subgraph.root.clone(),
        })?;
    let order = dag_enforcement::topological_order(graph)?;

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<(NodeIndex, f64)>> = vec![None; n];
    dist[root.index()] = 0.0;

    for &node in &order {
        if !dist[node.index()].is_finite() {
            continue;
        }
        let mut children = graph.children(node);
        children.sort_by_key(|(child, _)| child.index());
        for (child, cost) in children {
            // Unaffordable costs saturate instead of overflowing to infinity.
            let candidate = (dist[node.index()] + cost).min(f64::MAX);
            let better = match pred[child.index()] {
                None => true,
                Some((current, _)) => {
                    candidate < dist[child.index()]
                        || (candidate == dist[child.index()] && node.index() < current.index())
                }
            };
            if better {
                dist[child.index()] = candidate;
                pred[child.index()] = Some((node, cost));
            }
        }
    }

    let mut reduced = MetaGraph::new();
    for idx in graph.graph.node_indices() {
        if dist[idx.index()].is_finite() {
            reduced.add_node(graph.node(idx).clone());
        }
    }
    for idx in graph.graph.node_indices() {
        if let Some((parent, cost)) = pred[idx.index()] {
            let source = &graph.node(parent).id;
            let target = &graph.node(idx).id;
            if reduced.add_edge_by_id(source, target, cost).is_none() {
                return Err(GraphError::NodeNotFound { id: source.clone() });
            }
        }
    }

    Ok(RootedSubgraph {
        root: subgraph.root.clone(),
        graph: reduced,
    })
}
