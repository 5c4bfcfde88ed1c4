//! Interactions → weighted meta-graph, and caching of the result.

use std::path::Path;

use arbor_core::config::GraphConfig;
use arbor_core::{ArborResult, Interaction};
use arbor_graph::{snapshot, EdgeWeighting, MetaGraph, MetaGraphBuilder};
use tracing::info;

/// Build the meta-graph over `interactions` (any order) and weight it.
pub fn build_meta_graph(
    config: &GraphConfig,
    interactions: &[Interaction],
) -> ArborResult<MetaGraph> {
    let _span = crate::graph_span!(interactions.len()).entered();

    let mut graph = MetaGraphBuilder::new().build_unsorted(interactions.to_vec())?;
    let report = EdgeWeighting::from_config(config).apply(&mut graph);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        pruned = report.edges_pruned,
        "meta graph ready"
    );
    Ok(graph)
}

/// Save a compacted copy of `graph` (no subject/body text) as a JSON snapshot.
pub fn cache_meta_graph(graph: &MetaGraph, path: impl AsRef<Path>) -> ArborResult<()> {
    let mut compact = graph.clone();
    compact.compact();
    snapshot::save_json(&compact, path)
}
