use std::collections::HashSet;

use arbor_core::Interaction;
use arbor_graph::graph::dag_enforcement;
use arbor_graph::{binarize, unbinarize, MessageNode, MetaGraph};
use chrono::{TimeZone, Utc};
use petgraph::graph::NodeIndex;

fn node(id: &str, secs: i64, prize: f64) -> MessageNode {
    let at = Utc.timestamp_opt(1_000_000_000 + secs, 0).unwrap();
    MessageNode::from_interaction(&Interaction::new(id, "s", vec![], at).with_prize(prize))
}

/// Root with `k` children of increasing cost.
fn star(k: usize) -> MetaGraph {
    let mut graph = MetaGraph::new();
    graph.add_node(node("r", 0, 1.0));
    for i in 0..k {
        let id = format!("c{i}");
        graph.add_node(node(&id, 1 + i as i64, 1.0));
        graph.add_edge_by_id("r", &id, 1.0 + i as f64);
    }
    graph
}

/// Sum of real prizes and real-edge path costs reachable from `id`.
fn downstream(graph: &MetaGraph, id: &str) -> (f64, f64) {
    let start = graph.get_node(id).unwrap();
    let mut seen = HashSet::new();
    let mut stack: Vec<NodeIndex> = vec![start];
    let (mut prize, mut cost) = (0.0, 0.0);
    while let Some(current) = stack.pop() {
        for (child, c) in graph.children(current) {
            cost += c;
            if seen.insert(child) {
                prize += graph.node(child).prize;
                stack.push(child);
            }
        }
    }
    (prize, cost)
}

#[test]
fn wide_node_is_split_into_binary_chain() {
    let dag = star(5);
    let binary = binarize(&dag);

    assert_eq!(binary.dummy_count(), 3);
    for idx in binary.graph.node_indices() {
        assert!(binary.out_degree(idx) <= 2, "node {} is not binary", binary.node(idx).id);
    }
    assert!(dag_enforcement::is_acyclic(&binary));
}

#[test]
fn cheapest_child_stays_directly_under_parent() {
    let binary = binarize(&star(4));
    assert_eq!(binary.cost_by_id("r", "c0"), Some(1.0));
    assert!(binary.cost_by_id("r", "c3").is_none());
}

#[test]
fn dummies_carry_no_prize_and_zero_cost_edges() {
    let binary = binarize(&star(4));
    assert_eq!(binary.total_prize(), star(4).total_prize());
    for idx in binary.graph.node_indices() {
        let node = binary.node(idx);
        if node.is_dummy() {
            assert_eq!(node.prize, 0.0);
            assert!(node.id.starts_with("dummy-"));
            for (_, cost) in binary.parents(idx) {
                assert_eq!(cost, 0.0);
            }
        }
    }
    assert_eq!(binary.total_cost(), star(4).total_cost());
}

#[test]
fn narrow_graph_is_unchanged() {
    let dag = star(2);
    let binary = binarize(&dag);
    assert_eq!(binary.dummy_count(), 0);
    assert_eq!(binary.edge_list(), dag.edge_list());
}

#[test]
fn round_trip_restores_edges_and_costs() {
    let mut dag = star(6);
    // A second wide node below the root.
    for i in 0..3 {
        let id = format!("g{i}");
        dag.add_node(node(&id, 20 + i, 2.0));
        dag.add_edge_by_id("c0", &id, 0.5);
    }
    let restored = unbinarize(&binarize(&dag));

    assert_eq!(restored.dummy_count(), 0);
    assert_eq!(restored.edge_list(), dag.edge_list());
    for id in dag.ids() {
        assert_eq!(downstream(&restored, id), downstream(&dag, id), "mismatch below {id}");
    }
}
