//! Exact budgeted tree DP over a discretized budget.
//!
//! Costs are scaled by `10^fixed_point` and rounded up, the budget is scaled
//! and rounded down, so any tree found in integer units also fits the real
//! budget. For every node `n` and integer budget `b`:
//!
//! ```text
//! A(n, b) = prize(n) + best of
//!           nothing
//!           A(l, b − w_l)                       if w_l ≤ b
//!           A(r, b − w_r)                       if w_r ≤ b
//!           max_s A(l, s) + A(r, b − w_l − w_r − s)
//! ```
//!
//! The graph must be binary. Work is `O(nodes · budget²)` in integer units,
//! so keep `fixed_point` small.

use std::collections::HashSet;

use arbor_core::errors::TreeError;
use arbor_core::IDistance;
use arbor_graph::MetaGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::DfsPostOrder;
use tracing::debug;

use crate::arborescence::Arborescence;

/// Cost of an edge as seen by [`BudgetedTreeDp`].
pub trait IEdgeCost: Send + Sync {
    fn cost(&self, graph: &MetaGraph, source: NodeIndex, target: NodeIndex) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

/// The cost stored on the edge by weighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeAttributeCost;

impl IEdgeCost for EdgeAttributeCost {
    fn cost(&self, graph: &MetaGraph, source: NodeIndex, target: NodeIndex) -> f64 {
        graph.cost(source, target).unwrap_or(f64::MAX)
    }

    fn name(&self) -> &str {
        "edge_attribute"
    }
}

/// Squared topic distance between a child and its nearest real ancestor.
/// Edges into dummies are free.
pub struct VarianceCost {
    distance: Box<dyn IDistance>,
}

impl VarianceCost {
    pub fn new(distance: Box<dyn IDistance>) -> Self {
        Self { distance }
    }
}

impl IEdgeCost for VarianceCost {
    fn cost(&self, graph: &MetaGraph, source: NodeIndex, target: NodeIndex) -> f64 {
        let child = graph.node(target);
        if child.is_dummy() {
            return 0.0;
        }
        let anchor = graph.node(nearest_real_ancestor(graph, source));
        let d = self.distance.distance(&anchor.topics, &child.topics);
        let squared = d * d;
        if squared.is_finite() {
            squared
        } else {
            f64::MAX
        }
    }

    fn name(&self) -> &str {
        "variance"
    }
}

/// Walk up through dummy parents until a real node is found.
fn nearest_real_ancestor(graph: &MetaGraph, mut node: NodeIndex) -> NodeIndex {
    let mut seen = HashSet::new();
    while graph.node(node).is_dummy() && seen.insert(node) {
        match graph.parents(node).first() {
            Some(&(parent, _)) => node = parent,
            None => break,
        }
    }
    node
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Choice {
    Nothing,
    Left,
    Right,
    /// Both children; the left subtree receives this many budget units.
    Both(usize),
}

/// Integer-budget DP solver ("dp_dag_general").
#[derive(Debug, Clone, Copy)]
pub struct BudgetedTreeDp {
    fixed_point: u32,
}

impl BudgetedTreeDp {
    pub fn new(fixed_point: u32) -> Self {
        Self { fixed_point }
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.fixed_point as i32)
    }

    pub fn solve(
        &self,
        dag: &MetaGraph,
        root: &str,
        budget: f64,
        edge_cost: &dyn IEdgeCost,
    ) -> Result<Arborescence, TreeError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(TreeError::InfeasibleBudget { budget });
        }
        let root_idx = dag.get_node(root).ok_or_else(|| TreeError::RootNotFound {
            root: root.to_string(),
        })?;
        let scale = self.scale();

        // Children per reachable node, with real and integer costs.
        let mut post_order = Vec::new();
        let mut children: Vec<Vec<(NodeIndex, f64, usize)>> = vec![Vec::new(); dag.node_count()];
        let mut total_units = 0usize;
        let mut dfs = DfsPostOrder::new(&dag.graph, root_idx);
        while let Some(node) = dfs.next(&dag.graph) {
            let kids = dag.children(node);
            if kids.len() > 2 {
                return Err(TreeError::NotBinary {
                    id: dag.node(node).id.clone(),
                    children: kids.len(),
                });
            }
            let mut scaled: Vec<(NodeIndex, f64, usize)> = kids
                .into_iter()
                .map(|(child, _)| {
                    let cost = edge_cost.cost(dag, node, child);
                    (child, cost, to_units(cost, scale))
                })
                .collect();
            scaled.sort_by(|a, b| {
                a.2.cmp(&b.2)
                    .then_with(|| dag.node(a.0).id.cmp(&dag.node(b.0).id))
            });
            for &(_, _, units) in scaled.iter().filter(|k| k.2 != usize::MAX) {
                total_units = total_units.saturating_add(units);
            }
            children[node.index()] = scaled;
            post_order.push(node);
        }

        let budget_units = budget_to_units(budget, scale).min(total_units);
        let width = budget_units + 1;
        let mut value: Vec<Vec<f64>> = vec![Vec::new(); dag.node_count()];
        let mut choice: Vec<Vec<Choice>> = vec![Vec::new(); dag.node_count()];

        for &node in &post_order {
            let prize = dag.node(node).prize;
            let kids = &children[node.index()];
            let mut row = vec![prize; width];
            let mut picks = vec![Choice::Nothing; width];
            for b in 0..width {
                let mut best = 0.0;
                if let Some(&(left, _, wl)) = kids.first() {
                    if wl <= b {
                        let v = value[left.index()][b - wl];
                        if v > best {
                            best = v;
                            picks[b] = Choice::Left;
                        }
                    }
                }
                if let Some(&(right, _, wr)) = kids.get(1) {
                    if wr <= b {
                        let v = value[right.index()][b - wr];
                        if v > best {
                            best = v;
                            picks[b] = Choice::Right;
                        }
                    }
                    let wl = kids[0].2;
                    if let Some(rem) = b.checked_sub(wl).and_then(|r| r.checked_sub(wr)) {
                        let left_row = &value[kids[0].0.index()];
                        let right_row = &value[right.index()];
                        for s in 0..=rem {
                            let v = left_row[s] + right_row[rem - s];
                            if v > best {
                                best = v;
                                picks[b] = Choice::Both(s);
                            }
                        }
                    }
                }
                row[b] += best;
            }
            value[node.index()] = row;
            choice[node.index()] = picks;
        }

        // Top-down reconstruction; a node reached twice keeps its first parent.
        let mut tree = MetaGraph::new();
        tree.add_node(dag.node(root_idx).clone());
        let mut placed = HashSet::from([root_idx]);
        let mut stack = vec![(root_idx, budget_units)];
        while let Some((node, b)) = stack.pop() {
            let kids = &children[node.index()];
            let mut take = |child: NodeIndex, cost: f64, units: usize, tree: &mut MetaGraph| {
                if placed.insert(child) {
                    tree.add_node(dag.node(child).clone());
                    tree.add_edge_by_id(&dag.node(node).id, &dag.node(child).id, cost);
                    stack.push((child, units));
                }
            };
            match choice[node.index()][b] {
                Choice::Nothing => {}
                Choice::Left => {
                    let (child, cost, w) = kids[0];
                    take(child, cost, b - w, &mut tree);
                }
                Choice::Right => {
                    let (child, cost, w) = kids[1];
                    take(child, cost, b - w, &mut tree);
                }
                Choice::Both(s) => {
                    let (left, lc, wl) = kids[0];
                    let (right, rc, wr) = kids[1];
                    let rem = b - wl - wr;
                    take(left, lc, s, &mut tree);
                    take(right, rc, rem - s, &mut tree);
                }
            }
        }

        debug!(
            root,
            budget,
            budget_units,
            cost_fn = edge_cost.name(),
            nodes = tree.node_count(),
            prize = value[root_idx.index()][budget_units],
            "budgeted dp finished"
        );
        Ok(Arborescence::from_parts_unchecked(root.to_string(), tree))
    }
}

/// Round a cost up to integer units. Unaffordable costs saturate.
fn to_units(cost: f64, scale: f64) -> usize {
    let units = (cost.max(0.0) * scale).ceil();
    if units.is_finite() && units < usize::MAX as f64 {
        units as usize
    } else {
        usize::MAX
    }
}

fn budget_to_units(budget: f64, scale: f64) -> usize {
    let units = (budget * scale).floor();
    if units.is_finite() && units < usize::MAX as f64 {
        units as usize
    } else {
        usize::MAX
    }
}
