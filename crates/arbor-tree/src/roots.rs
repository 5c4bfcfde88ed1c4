//! Root detection for extracted trees.

use arbor_core::config::RootPolicy;
use arbor_core::errors::TreeError;
use arbor_graph::graph::dag_enforcement;
use arbor_graph::MetaGraph;
use petgraph::graph::NodeIndex;
use tracing::warn;

/// The single in-degree-zero node of `graph`.
///
/// With several candidates, `RootPolicy::Reject` fails and `RootPolicy::Warn`
/// logs and keeps the earliest by `(timestamp, id)`.
pub fn find_root(graph: &MetaGraph, policy: RootPolicy) -> Result<NodeIndex, TreeError> {
    let mut roots = dag_enforcement::roots(graph);
    match roots.len() {
        0 => Err(TreeError::NotAnArborescence {
            reason: "no node without a parent".to_string(),
        }),
        1 => Ok(roots[0]),
        _ => {
            roots.sort_by(|a, b| {
                let (na, nb) = (graph.node(*a), graph.node(*b));
                (na.timestamp, &na.id).cmp(&(nb.timestamp, &nb.id))
            });
            let ids: Vec<String> = roots.iter().map(|&r| graph.node(r).id.clone()).collect();
            match policy {
                RootPolicy::Reject => Err(TreeError::MultipleRootsDetected { roots: ids }),
                RootPolicy::Warn => {
                    warn!(roots = ?ids, kept = %ids[0], "multiple roots detected");
                    Ok(roots[0])
                }
            }
        }
    }
}
