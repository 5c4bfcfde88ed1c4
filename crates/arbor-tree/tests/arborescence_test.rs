use arbor_core::config::RootPolicy;
use arbor_core::errors::TreeError;
use arbor_graph::binarize;
use arbor_tree::{Arborescence, LagrangianTreeSolver};
use test_fixtures::{graph, node, star};

fn small_tree() -> Arborescence {
    let g = graph(
        &[("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 1.0)],
        &[("a", "b", 1.0), ("a", "c", 2.0), ("b", "d", 0.5)],
    );
    Arborescence::new("a", g).unwrap()
}

#[test]
fn valid_tree_reports_totals() {
    let tree = small_tree();
    assert_eq!(tree.root(), "a");
    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.edge_count(), 3);
    assert_eq!(tree.total_cost(), 3.5);
    assert_eq!(tree.total_prize(), 4.0);
    let mut non_leaf = tree.non_leaf_ids();
    non_leaf.sort();
    assert_eq!(non_leaf, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn node_with_two_parents_is_rejected() {
    let g = graph(
        &[("a", 1.0), ("b", 1.0), ("c", 1.0)],
        &[("a", "b", 1.0), ("a", "c", 1.0), ("b", "c", 1.0)],
    );
    let err = Arborescence::new("a", g).unwrap_err();
    assert!(matches!(err, TreeError::NotAnArborescence { .. }));
}

#[test]
fn unreachable_node_is_rejected() {
    let g = graph(&[("a", 1.0), ("b", 1.0), ("z", 1.0)], &[("a", "b", 1.0)]);
    let err = Arborescence::new("a", g).unwrap_err();
    assert!(err.to_string().contains("unreachable"));
}

#[test]
fn root_with_parent_is_rejected() {
    let g = graph(&[("a", 1.0), ("b", 1.0)], &[("a", "b", 1.0)]);
    assert!(matches!(
        Arborescence::new("b", g),
        Err(TreeError::NotAnArborescence { .. })
    ));
}

#[test]
fn unknown_root_is_rejected() {
    let g = graph(&[("a", 1.0)], &[]);
    assert!(matches!(
        Arborescence::new("x", g),
        Err(TreeError::RootNotFound { .. })
    ));
}

#[test]
fn single_in_degree_zero_node_is_detected() {
    let graph = small_tree().into_graph();
    let tree = Arborescence::from_graph(graph, RootPolicy::Reject).unwrap();
    assert_eq!(tree.root(), "a");
}

#[test]
fn several_roots_warn_policy_keeps_earliest() {
    // Node order fixes timestamps: "a" is earlier than "x".
    let g = graph(&[("a", 1.0), ("x", 1.0), ("b", 1.0)], &[("a", "b", 1.0)]);
    let tree = Arborescence::from_graph(g, RootPolicy::Warn).unwrap();
    assert_eq!(tree.root(), "a");
    assert!(tree.contains("b"));
    assert!(!tree.contains("x"));
    assert_eq!(tree.node_count(), 2);
}

#[test]
fn several_roots_warn_policy_drops_the_other_subtree() {
    let g = graph(
        &[("a", 1.0), ("x", 1.0), ("b", 1.0), ("y", 1.0)],
        &[("a", "b", 1.0), ("x", "y", 2.0)],
    );
    let tree = Arborescence::from_graph(g, RootPolicy::Warn).unwrap();
    assert_eq!(tree.root(), "a");
    assert_eq!(tree.total_cost(), 1.0);
    assert!(!tree.contains("y"));
}

#[test]
fn several_roots_reject_policy_fails() {
    let g = graph(&[("a", 1.0), ("x", 1.0)], &[]);
    let err = Arborescence::from_graph(g, RootPolicy::Reject).unwrap_err();
    match err {
        TreeError::MultipleRootsDetected { roots } => assert_eq!(roots, vec!["a", "x"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn singleton_is_empty() {
    let tree = Arborescence::singleton(node("solo", 0, 2.0));
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.total_prize(), 2.0);
}

#[test]
fn post_order_lists_children_before_parents() {
    let tree = small_tree();
    let order: Vec<String> = tree
        .post_order()
        .into_iter()
        .map(|idx| tree.graph().node(idx).id.clone())
        .collect();
    assert_eq!(order.len(), 4);
    let pos = |id: &str| order.iter().position(|o| o == id).unwrap();
    assert!(pos("d") < pos("b"));
    assert!(pos("b") < pos("a"));
    assert!(pos("c") < pos("a"));
    assert_eq!(order.last().map(String::as_str), Some("a"));
}

#[test]
fn json_round_trip_preserves_tree() {
    let tree = small_tree();
    let json = serde_json::to_string(&tree).unwrap();
    let back: Arborescence = serde_json::from_str(&json).unwrap();
    assert_eq!(back.root(), "a");
    assert_eq!(back.graph().edge_list(), tree.graph().edge_list());
}

#[test]
fn deserializing_a_non_tree_fails() {
    let json = r#"{
        "root": "a",
        "nodes": [
            {"id": "a", "sender": "s", "recipients": [], "timestamp": "2024-01-01T00:00:00Z", "prize": 1.0},
            {"id": "b", "sender": "s", "recipients": [], "timestamp": "2024-01-01T00:00:01Z", "prize": 1.0}
        ],
        "edges": [
            {"source": "a", "target": "b", "cost": 1.0},
            {"source": "b", "target": "a", "cost": 1.0}
        ]
    }"#;
    assert!(serde_json::from_str::<Arborescence>(json).is_err());
}

#[test]
fn unbinarize_drops_dummies_and_keeps_cost() {
    let dag = binarize(&star(4));
    let tree = LagrangianTreeSolver::new(2).solve(&dag, "r", 100.0).unwrap();
    assert!(tree.graph().dummy_count() > 0);

    let plain = tree.unbinarize();
    assert_eq!(plain.graph().dummy_count(), 0);
    assert_eq!(plain.node_count(), 5);
    assert_eq!(plain.total_cost(), tree.total_cost());
    assert!(Arborescence::new("r", plain.graph().clone()).is_ok());
}
