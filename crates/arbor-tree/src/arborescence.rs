//! Extracted story trees.

use std::collections::{HashSet, VecDeque};

use arbor_core::config::RootPolicy;
use arbor_core::errors::TreeError;
use arbor_graph::graph::dag_enforcement;
use arbor_graph::snapshot::SnapshotEdge;
use arbor_graph::{unbinarize, GraphSnapshot, MessageNode, MetaGraph};
use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::roots::find_root;

/// A rooted tree whose edges all point away from `root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TreeRecord", into = "TreeRecord")]
pub struct Arborescence {
    root: String,
    graph: MetaGraph,
}

/// Serialized form of an [`Arborescence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRecord {
    pub root: String,
    pub nodes: Vec<MessageNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl Arborescence {
    /// Validate that `graph` is an arborescence rooted at `root`.
    pub fn new(root: impl Into<String>, graph: MetaGraph) -> Result<Self, TreeError> {
        let root = root.into();
        let root_idx = graph.get_node(&root).ok_or_else(|| TreeError::RootNotFound {
            root: root.clone(),
        })?;
        check_tree_shape(&graph, root_idx)?;
        Ok(Self { root, graph })
    }

    /// Detect the root of `graph` under `policy`, then validate.
    ///
    /// When several roots are tolerated, only the part reachable from the
    /// kept root survives.
    pub fn from_graph(graph: MetaGraph, policy: RootPolicy) -> Result<Self, TreeError> {
        let root_idx = find_root(&graph, policy)?;
        let root = graph.node(root_idx).id.clone();
        if dag_enforcement::roots(&graph).len() <= 1 {
            return Self::new(root, graph);
        }
        let mut reachable = Vec::with_capacity(graph.node_count());
        let mut dfs = Dfs::new(&graph.graph, root_idx);
        while let Some(node) = dfs.next(&graph.graph) {
            reachable.push(node);
        }
        debug!(
            root = %root,
            dropped = graph.node_count() - reachable.len(),
            "dropped nodes outside the kept root"
        );
        Self::new(root, graph.induced(&reachable))
    }

    /// A tree holding only its root.
    pub fn singleton(root: MessageNode) -> Self {
        let id = root.id.clone();
        let mut graph = MetaGraph::new();
        graph.add_node(root);
        Self { root: id, graph }
    }

    pub(crate) fn from_parts_unchecked(root: String, graph: MetaGraph) -> Self {
        Self { root, graph }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn graph(&self) -> &MetaGraph {
        &self.graph
    }

    pub fn into_graph(self) -> MetaGraph {
        self.graph
    }

    /// No edges: nothing beyond the root was affordable or reachable.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn total_cost(&self) -> f64 {
        self.graph.total_cost()
    }

    pub fn total_prize(&self) -> f64 {
        self.graph.total_prize()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.graph.contains(id)
    }

    /// Ids of nodes with at least one child.
    pub fn non_leaf_ids(&self) -> Vec<String> {
        self.graph.non_leaf_ids()
    }

    /// Collapse binarization dummies, re-homing their edges onto real nodes.
    pub fn unbinarize(&self) -> Self {
        Self {
            root: self.root.clone(),
            graph: unbinarize(&self.graph),
        }
    }

    /// Nodes in post-order (children before parents), without recursion.
    pub fn post_order(&self) -> Vec<NodeIndex> {
        let Some(root) = self.graph.get_node(&self.root) else {
            return Vec::new();
        };
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut stack = vec![(root, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            stack.push((node, true));
            for (child, _) in self.graph.children(node) {
                stack.push((child, false));
            }
        }
        order
    }
}

fn check_tree_shape(graph: &MetaGraph, root: NodeIndex) -> Result<(), TreeError> {
    if graph.in_degree(root) != 0 {
        return Err(TreeError::NotAnArborescence {
            reason: format!("root {} has a parent", graph.node(root).id),
        });
    }
    let mut seen = HashSet::new();
    seen.insert(root);
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        for (child, _) in graph.children(node) {
            if !seen.insert(child) {
                return Err(TreeError::NotAnArborescence {
                    reason: format!("node {} is reached twice", graph.node(child).id),
                });
            }
            queue.push_back(child);
        }
    }
    if seen.len() != graph.node_count() {
        return Err(TreeError::NotAnArborescence {
            reason: format!(
                "{} of {} nodes unreachable from root",
                graph.node_count() - seen.len(),
                graph.node_count()
            ),
        });
    }
    Ok(())
}

impl From<Arborescence> for TreeRecord {
    fn from(tree: Arborescence) -> Self {
        let snapshot = GraphSnapshot::from_graph(&tree.graph);
        Self {
            root: tree.root,
            nodes: snapshot.nodes,
            edges: snapshot.edges,
        }
    }
}

impl TryFrom<TreeRecord> for Arborescence {
    type Error = TreeError;

    fn try_from(record: TreeRecord) -> Result<Self, Self::Error> {
        let graph = GraphSnapshot {
            nodes: record.nodes,
            edges: record.edges,
        }
        .into_graph()
        .map_err(|e| TreeError::NotAnArborescence {
            reason: e.to_string(),
        })?;
        Arborescence::new(record.root, graph)
    }
}
