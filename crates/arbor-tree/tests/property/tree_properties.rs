//! Property tests for tree extraction and bounds.

use arbor_graph::{binarize, MetaGraph};
use arbor_tree::{upper_bound, Arborescence, LagrangianTreeSolver};
use proptest::prelude::*;
use test_fixtures::node;

/// Heap-shaped binary tree: node `i` hangs under `(i - 1) / 2`.
fn heap_tree(rows: &[(f64, f64)]) -> MetaGraph {
    let mut g = MetaGraph::new();
    g.add_node(node("h000", 0, 1.0));
    for (i, &(cost, prize)) in rows.iter().enumerate() {
        let idx = i + 1;
        let id = format!("h{idx:03}");
        g.add_node(node(&id, idx as i64, prize));
        g.add_edge_by_id(&format!("h{:03}", (idx - 1) / 2), &id, cost);
    }
    g
}

/// Stacked diamonds: `t_k → l_k`, `t_k → q_k`, `l_k → t_{k+1}`, `q_k → t_{k+1}`.
/// Every `t_{k+1}` has two parents.
fn diamond_dag(levels: &[(f64, f64, f64, f64)]) -> MetaGraph {
    let mut g = MetaGraph::new();
    g.add_node(node("t000", 0, 1.0));
    let mut ts = 1;
    for (k, &(left, right, join, prize)) in levels.iter().enumerate() {
        let (top, l, q, bottom) = (
            format!("t{k:03}"),
            format!("l{k:03}"),
            format!("q{k:03}"),
            format!("t{:03}", k + 1),
        );
        for id in [&l, &q, &bottom] {
            g.add_node(node(id, ts, prize));
            ts += 1;
        }
        g.add_edge_by_id(&top, &l, left);
        g.add_edge_by_id(&top, &q, right);
        g.add_edge_by_id(&l, &bottom, join);
        g.add_edge_by_id(&q, &bottom, 0.0);
    }
    g
}

/// Root with unit-prize children at the given costs.
fn unit_star(costs: &[f64]) -> MetaGraph {
    let mut g = MetaGraph::new();
    g.add_node(node("r", 0, 1.0));
    for (i, &cost) in costs.iter().enumerate() {
        let id = format!("c{i:03}");
        g.add_node(node(&id, 1 + i as i64, 1.0));
        g.add_edge_by_id("r", &id, cost);
    }
    g
}

fn rows_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0..5.0f64, 0.0..3.0f64), 0..40)
}

fn edge_cost() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0..3.0f64]
}

fn levels_strategy() -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    prop::collection::vec((edge_cost(), edge_cost(), edge_cost(), 0.0..2.0f64), 0..12)
}

proptest! {
    #[test]
    fn solver_output_fits_budget(rows in rows_strategy(), budget in 0.0..30.0f64) {
        let dag = heap_tree(&rows);
        let tree = LagrangianTreeSolver::new(3).solve(&dag, "h000", budget).unwrap();
        prop_assert!(tree.total_cost() <= budget + 1e-9);
        prop_assert_eq!(tree.root(), "h000");
    }

    #[test]
    fn solver_output_fits_budget_on_shared_descendants(
        levels in levels_strategy(),
        budget in 0.0..10.0f64,
    ) {
        let dag = diamond_dag(&levels);
        let tree = LagrangianTreeSolver::new(3).solve(&dag, "t000", budget).unwrap();
        prop_assert!(tree.total_cost() <= budget + 1e-9);
        prop_assert!(Arborescence::new("t000", tree.graph().clone()).is_ok());
    }

    #[test]
    fn heap_tree_prize_is_monotone_in_budget(
        rows in rows_strategy(),
        low in 0.0..20.0f64,
        extra in 0.0..20.0f64,
    ) {
        let dag = heap_tree(&rows);
        let solver = LagrangianTreeSolver::new(3);
        let small = solver.solve(&dag, "h000", low).unwrap();
        let large = solver.solve(&dag, "h000", low + extra).unwrap();
        prop_assert!(small.total_prize() <= large.total_prize() + 1e-9);
    }

    #[test]
    fn dag_prize_is_monotone_in_budget(
        levels in levels_strategy(),
        low in 0.0..10.0f64,
        extra in 0.0..10.0f64,
    ) {
        let dag = diamond_dag(&levels);
        let solver = LagrangianTreeSolver::new(3);
        let small = solver.solve(&dag, "t000", low).unwrap();
        let large = solver.solve(&dag, "t000", low + extra).unwrap();
        prop_assert!(small.total_prize() <= large.total_prize() + 1e-9);
    }

    #[test]
    fn unit_star_prize_is_monotone_in_budget(
        costs in prop::collection::vec(0.1..5.0f64, 1..15),
        low in 0.0..20.0f64,
        extra in 0.0..20.0f64,
    ) {
        let dag = binarize(&unit_star(&costs));
        let solver = LagrangianTreeSolver::new(3);
        let small = solver.solve(&dag, "r", low).unwrap();
        let large = solver.solve(&dag, "r", low + extra).unwrap();
        prop_assert!(small.total_prize() <= large.total_prize());
        prop_assert!(large.total_cost() <= low + extra + 1e-9);
    }

    #[test]
    fn bound_never_grows_when_budget_shrinks(
        rows in rows_strategy(),
        low in 0.0..20.0f64,
        extra in 0.0..20.0f64,
    ) {
        let dag = heap_tree(&rows);
        let tight = upper_bound(&dag, "h000", low).unwrap();
        let loose = upper_bound(&dag, "h000", low + extra).unwrap();
        prop_assert!(tight <= loose);
    }

    #[test]
    fn bound_covers_solver_tree(rows in rows_strategy(), budget in 0.0..30.0f64) {
        let dag = heap_tree(&rows);
        let tree = LagrangianTreeSolver::new(3).solve(&dag, "h000", budget).unwrap();
        prop_assert!(tree.node_count() <= upper_bound(&dag, "h000", budget).unwrap());
    }
}
