//! Per-node subtree scores of an extracted tree.

use std::collections::HashMap;

use arbor_core::INodeScorer;
use arbor_tree::Arborescence;

/// Score every internal node of `tree` (root included) by the prize and cost
/// of the subtree below it. Leaves get no score.
///
/// For an internal node `n`: `prize_sum` is its own prize plus its
/// children's sums, `cost_sum` is its children's sums plus the edge costs to
/// them. A leaf contributes its prize and zero cost.
pub fn node_scores_from_tree(
    tree: &Arborescence,
    scorer: &dyn INodeScorer,
) -> HashMap<String, f64> {
    let graph = tree.graph();
    let mut sums: HashMap<usize, (f64, f64)> = HashMap::with_capacity(graph.node_count());
    let mut scores = HashMap::new();

    for idx in tree.post_order() {
        let node = graph.node(idx);
        let children = graph.children(idx);
        if children.is_empty() {
            sums.insert(idx.index(), (node.prize, 0.0));
            continue;
        }
        let (mut prize_sum, mut cost_sum) = (node.prize, 0.0);
        for (child, edge_cost) in children {
            let (p, c) = sums.get(&child.index()).copied().unwrap_or((0.0, 0.0));
            prize_sum += p;
            cost_sum += c + edge_cost;
        }
        sums.insert(idx.index(), (prize_sum, cost_sum));
        scores.insert(node.id.clone(), scorer.score(prize_sum, cost_sum));
    }
    scores
}
