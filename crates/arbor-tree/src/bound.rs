//! Cheap upper bound on how many nodes a budget can cover below a root.

use arbor_core::constants::COST_EPSILON;
use arbor_core::errors::TreeError;
use arbor_graph::MetaGraph;
use petgraph::visit::Dfs;

/// Count of nodes (root included) coverable under `budget`.
///
/// Every descendant is charged its cheapest incoming edge; the charges are
/// taken in ascending order while the running total stays within budget.
/// No tree under `budget` can cover more nodes, so the count only ranks
/// roots and never decides the final tree.
pub fn upper_bound(graph: &MetaGraph, root: &str, budget: f64) -> Result<usize, TreeError> {
    let start = graph.get_node(root).ok_or_else(|| TreeError::RootNotFound {
        root: root.to_string(),
    })?;

    let mut min_costs = Vec::new();
    let mut dfs = Dfs::new(&graph.graph, start);
    while let Some(node) = dfs.next(&graph.graph) {
        if node == start {
            continue;
        }
        let cheapest = graph
            .parents(node)
            .into_iter()
            .map(|(_, cost)| cost)
            .fold(f64::INFINITY, f64::min);
        min_costs.push(cheapest);
    }
    min_costs.sort_by(f64::total_cmp);

    let mut total = 0.0;
    let mut count = 1;
    for cost in min_costs {
        if total + cost > budget + COST_EPSILON {
            break;
        }
        total += cost;
        count += 1;
    }
    Ok(count)
}
