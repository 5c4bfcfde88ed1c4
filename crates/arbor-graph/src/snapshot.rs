//! JSON snapshot of a meta-graph, so a weighted graph can be cached and
//! reloaded instead of rebuilt.

use std::fs;
use std::path::Path;

use arbor_core::errors::{ArborError, ArborResult, GraphError};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::graph::{dag_enforcement, MessageNode, MetaGraph};

/// Serializable edge: endpoints by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: String,
    pub target: String,
    pub cost: f64,
}

/// Serializable form of a [`MetaGraph`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<MessageNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl GraphSnapshot {
    pub fn from_graph(graph: &MetaGraph) -> Self {
        let nodes = graph.graph.node_weights().cloned().collect();
        let edges = graph
            .graph
            .edge_references()
            .map(|e| SnapshotEdge {
                source: graph.node(e.source()).id.clone(),
                target: graph.node(e.target()).id.clone(),
                cost: e.weight().cost,
            })
            .collect();
        Self { nodes, edges }
    }

    /// Rebuild the graph. Node ids must be unique, every edge endpoint must
    /// name a snapshot node, and the edges must not form a cycle.
    pub fn into_graph(self) -> Result<MetaGraph, GraphError> {
        let mut graph = MetaGraph::new();
        for node in self.nodes {
            if graph.contains(&node.id) {
                return Err(GraphError::SnapshotInconsistency {
                    details: format!("node {} appears twice", node.id),
                });
            }
            graph.add_node(node);
        }
        for edge in self.edges {
            if graph
                .add_edge_by_id(&edge.source, &edge.target, edge.cost)
                .is_none()
            {
                return Err(GraphError::SnapshotInconsistency {
                    details: format!(
                        "edge {} -> {} names an unknown node",
                        edge.source, edge.target
                    ),
                });
            }
        }
        if !dag_enforcement::is_acyclic(&graph) {
            return Err(GraphError::SnapshotInconsistency {
                details: "edges form a cycle".to_string(),
            });
        }
        Ok(graph)
    }
}

pub fn save_json(graph: &MetaGraph, path: impl AsRef<Path>) -> ArborResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(&GraphSnapshot::from_graph(graph))?;
    fs::write(path, json).map_err(|e| io_error(path, e))?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "meta graph saved"
    );
    Ok(())
}

pub fn load_json(path: impl AsRef<Path>) -> ArborResult<MetaGraph> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let snapshot: GraphSnapshot = serde_json::from_str(&json)?;
    let graph = snapshot.into_graph()?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "meta graph loaded"
    );
    Ok(graph)
}

fn io_error(path: &Path, err: std::io::Error) -> ArborError {
    ArborError::IoError {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
