//! Budgeted maximum-prize arborescence on a binary DAG via Lagrangian relaxation.
//!
//! For a multiplier `u ≥ 0` the budget constraint is moved into the objective
//! and solved exactly bottom-up:
//!
//! ```text
//! f(n) = prize(n) + Σ_c max(0, f(c) − u · cost(n, c))
//! ```
//!
//! A child is kept iff its gain is strictly positive. Raising `u` only ever
//! drops children, and the kept set changes at finitely many multipliers:
//! where some kept child's gain, linear in `u` between changes, reaches zero.
//! The search walks those breakpoints upward from `u = 0`, ending with the tree
//! of free edges only, which fits any budget. Every rung of that ladder is then
//! extended by a fixed greedy sequence of frontier nodes (best prize/cost
//! ratio first), and the answer is the best prefix that fits the budget.
//!
//! Neither the ladder nor the greedy sequences depend on the budget, so the
//! answer always fits it and its prize never drops when the budget grows. It
//! may still fall short of the true optimum by the duality gap.

use std::cmp::Ordering;
use std::collections::VecDeque;

use arbor_core::constants::{COST_EPSILON, MAX_LAGRANGE_ITERATIONS};
use arbor_core::errors::TreeError;
use arbor_graph::MetaGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::DfsPostOrder;
use tracing::debug;

use crate::arborescence::Arborescence;

/// Diagnostics of one solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveReport {
    /// Multiplier of the rung the answer was grown from.
    pub multiplier: f64,
    /// Breakpoints visited past `u = 0`.
    pub iterations: usize,
    /// Nodes added by greedy completion.
    pub greedy_additions: usize,
    pub total_cost: f64,
    pub total_prize: f64,
}

/// Lagrangian tree solver ("lst_dag").
#[derive(Debug, Clone, Copy)]
pub struct LagrangianTreeSolver {
    decimal_precision: u32,
}

impl LagrangianTreeSolver {
    pub fn new(decimal_precision: u32) -> Self {
        Self { decimal_precision }
    }

    /// Relative step taken past each breakpoint; breakpoints closer than
    /// this are merged.
    pub fn tolerance(&self) -> f64 {
        10f64
            .powi(-(self.decimal_precision as i32))
            .max(f64::EPSILON * 16.0)
    }

    pub fn solve(
        &self,
        dag: &MetaGraph,
        root: &str,
        budget: f64,
    ) -> Result<Arborescence, TreeError> {
        self.solve_detailed(dag, root, budget).map(|(tree, _)| tree)
    }

    /// Solve and report how the multiplier search went.
    pub fn solve_detailed(
        &self,
        dag: &MetaGraph,
        root: &str,
        budget: f64,
    ) -> Result<(Arborescence, SolveReport), TreeError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(TreeError::InfeasibleBudget { budget });
        }
        let root_idx = dag.get_node(root).ok_or_else(|| TreeError::RootNotFound {
            root: root.to_string(),
        })?;
        let problem = Problem::new(dag, root_idx)?;
        let mut report = SolveReport::default();

        let unconstrained = problem.relax(0.0);
        let best = if fits(unconstrained.tree.cost, budget) {
            unconstrained.tree
        } else {
            let ladder = problem.ladder(unconstrained, self.tolerance());
            report.iterations = ladder.len() - 1;

            let mut best: Option<PartialTree> = None;
            // Above the cost of the next larger rung, that rung takes over.
            let mut cap = f64::INFINITY;
            for rung in ladder {
                let rung_cap = cap;
                cap = rung.tree.cost;
                if !fits(rung.tree.cost, budget) {
                    continue;
                }
                let mut tree = rung.tree;
                let added = problem.complete_greedily(&mut tree, budget, rung_cap);
                if best.as_ref().map_or(true, |b| tree.prize > b.prize) {
                    report.multiplier = rung.multiplier;
                    report.greedy_additions = added;
                    best = Some(tree);
                }
            }
            best.unwrap_or_else(|| problem.root_only())
        };

        report.total_cost = best.cost;
        report.total_prize = best.prize;
        debug!(
            root,
            budget,
            multiplier = report.multiplier,
            iterations = report.iterations,
            greedy = report.greedy_additions,
            cost = best.cost,
            prize = best.prize,
            "lagrangian solve finished"
        );

        Ok((problem.into_tree(&best), report))
    }
}

fn fits(cost: f64, budget: f64) -> bool {
    cost <= budget + COST_EPSILON
}

/// A tree under construction, as node and edge lists over the DAG's indices.
#[derive(Debug, Clone)]
struct PartialTree {
    nodes: Vec<NodeIndex>,
    edges: Vec<(NodeIndex, NodeIndex, f64)>,
    cost: f64,
    prize: f64,
}

/// One step of the multiplier ladder.
struct Rung {
    multiplier: f64,
    tree: PartialTree,
}

/// The relaxed optimum at one multiplier.
struct Relaxation {
    tree: PartialTree,
    /// Smallest multiplier at which a kept child with a costly subtree stops
    /// paying for itself. `None` once only free edges are kept.
    next: Option<f64>,
}

/// A frontier node reachable from the tree through a path of dummy nodes.
struct Candidate {
    path: Vec<(NodeIndex, NodeIndex, f64)>,
    target: NodeIndex,
    cost: f64,
    prize: f64,
}

impl Candidate {
    fn ratio(&self) -> f64 {
        if self.cost == 0.0 {
            f64::INFINITY
        } else {
            self.prize / self.cost
        }
    }
}

struct Problem<'a> {
    graph: &'a MetaGraph,
    root: NodeIndex,
    /// Nodes reachable from the root, children before parents.
    post_order: Vec<NodeIndex>,
    /// Per node, children sorted by (cost, id).
    children: Vec<Vec<(NodeIndex, f64)>>,
}

impl<'a> Problem<'a> {
    fn new(graph: &'a MetaGraph, root: NodeIndex) -> Result<Self, TreeError> {
        let mut post_order = Vec::new();
        let mut children = vec![Vec::new(); graph.node_count()];
        let mut dfs = DfsPostOrder::new(&graph.graph, root);
        while let Some(node) = dfs.next(&graph.graph) {
            let mut kids = graph.children(node);
            if kids.len() > 2 {
                return Err(TreeError::NotBinary {
                    id: graph.node(node).id.clone(),
                    children: kids.len(),
                });
            }
            kids.sort_by(|(a, ca), (b, cb)| {
                ca.total_cmp(cb)
                    .then_with(|| graph.node(*a).id.cmp(&graph.node(*b).id))
            });
            children[node.index()] = kids;
            post_order.push(node);
        }
        Ok(Self {
            graph,
            root,
            post_order,
            children,
        })
    }

    /// Relaxed trees from `u = 0` upward, one per breakpoint. The last rung
    /// keeps free edges only.
    fn ladder(&self, first: Relaxation, step: f64) -> Vec<Rung> {
        let mut u = 0.0;
        let mut next = first.next;
        let mut rungs = vec![Rung {
            multiplier: u,
            tree: first.tree,
        }];
        while let Some(at) = next {
            if rungs.len() > MAX_LAGRANGE_ITERATIONS || !at.is_finite() {
                break;
            }
            u = if at > u {
                at * (1.0 + step)
            } else if u > 0.0 {
                u * 2.0
            } else {
                f64::MIN_POSITIVE
            };
            if !u.is_finite() {
                break;
            }
            let relaxed = self.relax(u);
            next = relaxed.next;
            rungs.push(Rung {
                multiplier: u,
                tree: relaxed.tree,
            });
        }
        if rungs.last().map_or(true, |r| r.tree.cost > 0.0) {
            rungs.push(Rung {
                multiplier: f64::INFINITY,
                tree: self.relax(f64::INFINITY).tree,
            });
        }
        rungs
    }

    /// Best tree of the relaxed objective at multiplier `u`, plus the next
    /// multiplier at which it changes.
    fn relax(&self, u: f64) -> Relaxation {
        let n = self.graph.node_count();
        let mut value = vec![0.0; n];
        // Between breakpoints f(n) = prize_sum(n) − u · cost_sum(n).
        let mut prize_sum = vec![0.0; n];
        let mut cost_sum = vec![0.0; n];
        let mut chosen: Vec<Vec<(NodeIndex, f64)>> = vec![Vec::new(); n];
        let mut next: Option<f64> = None;

        for &node in &self.post_order {
            let prize = self.graph.node(node).prize;
            let (mut v, mut p, mut c) = (prize, prize, 0.0);
            for &(child, cost) in &self.children[node.index()] {
                let penalty = if cost > 0.0 { u * cost } else { 0.0 };
                let gain = value[child.index()] - penalty;
                if gain > 0.0 {
                    let slope = cost_sum[child.index()] + cost;
                    v += gain;
                    p += prize_sum[child.index()];
                    c += slope;
                    chosen[node.index()].push((child, cost));
                    if slope > 0.0 {
                        let at = prize_sum[child.index()] / slope;
                        let at = if at.is_nan() { f64::INFINITY } else { at };
                        next = Some(next.map_or(at, |m: f64| m.min(at)));
                    }
                }
            }
            value[node.index()] = v;
            prize_sum[node.index()] = p;
            cost_sum[node.index()] = c;
        }

        // Top-down reconstruction. A DAG node picked under two parents is kept
        // under the first one reached; dropping the second copy only lowers cost.
        let mut in_tree = vec![false; n];
        in_tree[self.root.index()] = true;
        let mut tree = self.root_only();
        let mut queue = VecDeque::from([self.root]);
        while let Some(node) = queue.pop_front() {
            for &(child, cost) in &chosen[node.index()] {
                if in_tree[child.index()] {
                    continue;
                }
                in_tree[child.index()] = true;
                tree.nodes.push(child);
                tree.edges.push((node, child, cost));
                tree.cost += cost;
                tree.prize += self.graph.node(child).prize;
                queue.push_back(child);
            }
        }
        Relaxation { tree, next }
    }

    fn root_only(&self) -> PartialTree {
        PartialTree {
            nodes: vec![self.root],
            edges: Vec::new(),
            cost: 0.0,
            prize: self.graph.node(self.root).prize,
        }
    }

    /// Grow `tree` by frontier nodes, best prize/cost ratio first (ties:
    /// cheaper, then smaller id), never past `cap`. The order of additions
    /// does not depend on `budget`; growth stops at the first node that would
    /// exceed it. Returns the number of real nodes added.
    fn complete_greedily(&self, tree: &mut PartialTree, budget: f64, cap: f64) -> usize {
        let mut in_tree = vec![false; self.graph.node_count()];
        for &node in &tree.nodes {
            in_tree[node.index()] = true;
        }

        let mut added = 0;
        loop {
            let room = cap - tree.cost;
            let mut best: Option<Candidate> = None;
            for &node in &tree.nodes {
                for candidate in self.frontier(node, &in_tree, room) {
                    if best
                        .as_ref()
                        .map_or(true, |b| self.prefer(&candidate, b) == Ordering::Less)
                    {
                        best = Some(candidate);
                    }
                }
            }
            let Some(candidate) = best else {
                break;
            };
            if !fits(tree.cost + candidate.cost, budget) {
                break;
            }
            for &(parent, child, cost) in &candidate.path {
                in_tree[child.index()] = true;
                tree.nodes.push(child);
                tree.edges.push((parent, child, cost));
            }
            tree.cost += candidate.cost;
            tree.prize += candidate.prize;
            added += 1;
        }
        added
    }

    /// Real nodes outside the tree reachable from `from` through dummies
    /// outside the tree, with positive prize and affordable path cost.
    fn frontier(&self, from: NodeIndex, in_tree: &[bool], remaining: f64) -> Vec<Candidate> {
        let mut found = Vec::new();
        let mut stack: Vec<(NodeIndex, Vec<(NodeIndex, NodeIndex, f64)>, f64)> =
            vec![(from, Vec::new(), 0.0)];
        while let Some((node, path, acc)) = stack.pop() {
            for &(child, cost) in &self.children[node.index()] {
                if in_tree[child.index()] {
                    continue;
                }
                let total = acc + cost;
                if !fits(total, remaining) {
                    continue;
                }
                let mut next = path.clone();
                next.push((node, child, cost));
                let child_node = self.graph.node(child);
                if child_node.is_dummy() {
                    stack.push((child, next, total));
                } else if child_node.prize > 0.0 {
                    found.push(Candidate {
                        path: next,
                        target: child,
                        cost: total,
                        prize: child_node.prize,
                    });
                }
            }
        }
        found
    }

    fn prefer(&self, a: &Candidate, b: &Candidate) -> Ordering {
        b.ratio()
            .total_cmp(&a.ratio())
            .then_with(|| a.cost.total_cmp(&b.cost))
            .then_with(|| {
                self.graph
                    .node(a.target)
                    .id
                    .cmp(&self.graph.node(b.target).id)
            })
    }

    fn into_tree(&self, tree: &PartialTree) -> Arborescence {
        let mut graph = MetaGraph::new();
        for &node in &tree.nodes {
            graph.add_node(self.graph.node(node).clone());
        }
        for &(parent, child, cost) in &tree.edges {
            let (source, target) = (&self.graph.node(parent).id, &self.graph.node(child).id);
            graph.add_edge_by_id(source, target, cost);
        }
        Arborescence::from_parts_unchecked(self.graph.node(self.root).id.clone(), graph)
    }
}
