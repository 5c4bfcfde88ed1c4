//! Arena-backed meta-graph: typed node and edge payloads in a petgraph `DiGraph`,
//! plus an id → index map for lookups by message id.

use std::collections::HashMap;

use arbor_core::constants::DUMMY_PREFIX;
use arbor_core::config::defaults::DEFAULT_PRIZE;
use arbor_core::Interaction;
use chrono::{DateTime, Utc};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// Whether a node stands for a real interaction or was introduced by binarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Real,
    Dummy,
}

/// Node payload: one interaction and its prize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageNode {
    pub id: String,
    #[serde(default)]
    pub kind: NodeKind,
    pub sender: String,
    pub recipients: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Relevance weight collected when the node joins a tree.
    pub prize: f64,
    /// Prize carried by the source interaction, if it declared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_prize: Option<f64>,
    #[serde(default)]
    pub topics: Vec<f64>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

impl MessageNode {
    pub fn from_interaction(interaction: &Interaction) -> Self {
        Self {
            id: interaction.id.clone(),
            kind: NodeKind::Real,
            sender: interaction.sender.clone(),
            recipients: interaction.recipients.clone(),
            timestamp: interaction.timestamp,
            prize: interaction.prize.unwrap_or(DEFAULT_PRIZE),
            declared_prize: interaction.prize,
            topics: interaction.topics.clone(),
            subject: interaction.subject.clone(),
            body: interaction.body.clone(),
        }
    }

    /// Zero-prize placeholder hanging under `parent`. Shares the parent's timestamp
    /// so it never falls outside a time window the parent is in.
    pub fn dummy(parent: &MessageNode, ordinal: usize) -> Self {
        Self {
            id: format!("{DUMMY_PREFIX}{}-{ordinal}", parent.id),
            kind: NodeKind::Dummy,
            sender: parent.sender.clone(),
            recipients: Vec::new(),
            timestamp: parent.timestamp,
            prize: 0.0,
            declared_prize: None,
            topics: Vec::new(),
            subject: String::new(),
            body: String::new(),
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.kind == NodeKind::Dummy
    }
}

/// Edge payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostEdge {
    pub cost: f64,
}

impl CostEdge {
    pub fn new(cost: f64) -> Self {
        Self { cost }
    }
}

/// Directed graph over interactions, indexed by message id.
#[derive(Debug, Clone, Default)]
pub struct MetaGraph {
    pub graph: DiGraph<MessageNode, CostEdge>,
    index: HashMap<String, NodeIndex>,
}

impl MetaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or return the index of the node already carrying its id.
    pub fn add_node(&mut self, node: MessageNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    /// Insert or overwrite the edge `source → target`.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, cost: f64) -> EdgeIndex {
        self.graph.update_edge(source, target, CostEdge::new(cost))
    }

    /// Add an edge between two nodes identified by id.
    pub fn add_edge_by_id(&mut self, source: &str, target: &str, cost: f64) -> Option<EdgeIndex> {
        let s = self.get_node(source)?;
        let t = self.get_node(target)?;
        Some(self.add_edge(s, t, cost))
    }

    pub fn get_node(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &MessageNode {
        &self.graph[idx]
    }

    pub fn node_by_id(&self, id: &str) -> Option<&MessageNode> {
        self.get_node(id).map(|idx| &self.graph[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Cost of the edge `source → target`, if present.
    pub fn cost(&self, source: NodeIndex, target: NodeIndex) -> Option<f64> {
        self.graph
            .find_edge(source, target)
            .map(|e| self.graph[e].cost)
    }

    pub fn cost_by_id(&self, source: &str, target: &str) -> Option<f64> {
        self.cost(self.get_node(source)?, self.get_node(target)?)
    }

    /// Outgoing `(child, cost)` pairs.
    pub fn children(&self, idx: NodeIndex) -> Vec<(NodeIndex, f64)> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight().cost))
            .collect()
    }

    /// Incoming `(parent, cost)` pairs.
    pub fn parents(&self, idx: NodeIndex) -> Vec<(NodeIndex, f64)> {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.source(), e.weight().cost))
            .collect()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Ids of nodes with at least one child, in insertion order.
    pub fn non_leaf_ids(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|&idx| self.out_degree(idx) > 0)
            .map(|idx| self.graph[idx].id.clone())
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|n| n.id.as_str())
    }

    /// `(source id, target id, cost)` for every edge, sorted for stable comparison.
    pub fn edge_list(&self) -> Vec<(String, String, f64)> {
        let mut edges: Vec<(String, String, f64)> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].id.clone(),
                    self.graph[e.target()].id.clone(),
                    e.weight().cost,
                )
            })
            .collect();
        edges.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        edges
    }

    pub fn total_prize(&self) -> f64 {
        self.graph.node_weights().map(|n| n.prize).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.graph.edge_weights().map(|e| e.cost).sum()
    }

    pub fn dummy_count(&self) -> usize {
        self.graph.node_weights().filter(|n| n.is_dummy()).count()
    }

    /// Drop message text from every node, keeping only what extraction needs.
    pub fn compact(&mut self) {
        for node in self.graph.node_weights_mut() {
            node.subject = String::new();
            node.body = String::new();
        }
    }

    /// Copy the nodes in `nodes` (in the given order) and every edge among them.
    pub fn induced(&self, nodes: &[NodeIndex]) -> MetaGraph {
        let mut sub = MetaGraph::new();
        let mut mapping = HashMap::with_capacity(nodes.len());
        for &idx in nodes {
            mapping.insert(idx, sub.add_node(self.graph[idx].clone()));
        }
        for &idx in nodes {
            for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
                if let Some(&target) = mapping.get(&edge.target()) {
                    sub.add_edge(mapping[&idx], target, edge.weight().cost);
                }
            }
        }
        sub
    }
}
