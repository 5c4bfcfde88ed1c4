use arbor_core::errors::GraphError;
use arbor_core::Interaction;
use arbor_graph::graph::dag_enforcement;
use arbor_graph::MetaGraphBuilder;
use chrono::{DateTime, TimeZone, Utc};

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_000_000_000 + secs, 0).unwrap()
}

fn msg(id: &str, sender: &str, recipients: &[&str], secs: i64) -> Interaction {
    Interaction::new(
        id,
        sender,
        recipients.iter().map(|r| r.to_string()).collect(),
        ts(secs),
    )
}

#[test]
fn reply_consumes_the_slot_it_links_through() {
    let interactions = vec![
        msg("msg0", "A", &["B"], 0),
        msg("msg1", "B", &["A"], 1),
        msg("msg2", "B", &["C"], 2),
    ];
    let graph = MetaGraphBuilder::new().build(&interactions).unwrap();

    assert_eq!(graph.node_count(), 3);
    let edges: Vec<(String, String)> = graph
        .edge_list()
        .into_iter()
        .map(|(s, t, _)| (s, t))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("msg0".to_string(), "msg1".to_string()),
            ("msg1".to_string(), "msg2".to_string()),
        ]
    );
}

#[test]
fn consecutive_messages_from_one_sender_form_a_chain() {
    let interactions = vec![
        msg("a", "A", &["X"], 0),
        msg("b", "A", &["Y"], 1),
        msg("c", "A", &["Z"], 2),
    ];
    let graph = MetaGraphBuilder::new().build(&interactions).unwrap();
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.cost_by_id("a", "b").is_some());
    assert!(graph.cost_by_id("b", "c").is_some());
    assert!(graph.cost_by_id("a", "c").is_none());
}

#[test]
fn message_to_a_shared_recipient_links_to_pending_node() {
    // msg0 touched B; msg1 from C to B picks it up through B's slot.
    let interactions = vec![msg("msg0", "A", &["B"], 0), msg("msg1", "C", &["B"], 1)];
    let graph = MetaGraphBuilder::new().build(&interactions).unwrap();
    assert!(graph.cost_by_id("msg0", "msg1").is_some());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn unrelated_conversations_stay_disconnected() {
    let interactions = vec![msg("m0", "A", &["B"], 0), msg("m1", "C", &["D"], 1)];
    let graph = MetaGraphBuilder::new().build(&interactions).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn self_addressed_message_does_not_loop() {
    let interactions = vec![msg("m0", "A", &["A", "A"], 0), msg("m1", "A", &["B"], 1)];
    let graph = MetaGraphBuilder::new().build(&interactions).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert!(dag_enforcement::is_acyclic(&graph));
}

#[test]
fn node_linked_through_two_slots_gets_one_edge() {
    // m1 drains m0 from both A's and B's slot.
    let interactions = vec![msg("m0", "A", &["B"], 0), msg("m1", "B", &["A"], 1)];
    let graph = MetaGraphBuilder::new().build(&interactions).unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn rejects_unsorted_input_before_building() {
    let interactions = vec![msg("m0", "A", &["B"], 5), msg("m1", "B", &["A"], 1)];
    let err = MetaGraphBuilder::new().build(&interactions).unwrap_err();
    match err {
        GraphError::InvalidInteraction { id, reason } => {
            assert_eq!(id, "m1");
            assert!(reason.contains("out of order"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_missing_sender() {
    let interactions = vec![msg("m0", "", &["B"], 0)];
    let err = MetaGraphBuilder::new().build(&interactions).unwrap_err();
    assert!(matches!(err, GraphError::InvalidInteraction { .. }));
}

#[test]
fn rejects_negative_or_non_finite_prize() {
    for prize in [-1.0, f64::NAN, f64::INFINITY] {
        let interactions = vec![
            msg("m0", "A", &["B"], 0),
            msg("m1", "B", &["A"], 1).with_prize(prize),
        ];
        let err = MetaGraphBuilder::new().build(&interactions).unwrap_err();
        assert!(
            matches!(err, GraphError::InvalidInteraction { ref id, .. } if id == "m1"),
            "prize {prize} accepted"
        );
    }
}

#[test]
fn accepts_zero_prize() {
    let interactions = vec![msg("m0", "A", &["B"], 0).with_prize(0.0)];
    assert!(MetaGraphBuilder::new().build(&interactions).is_ok());
}

#[test]
fn rejects_non_finite_topic_weight() {
    let interactions = vec![msg("m0", "A", &["B"], 0).with_topics(vec![0.5, f64::NAN])];
    let err = MetaGraphBuilder::new().build(&interactions).unwrap_err();
    assert!(matches!(err, GraphError::InvalidInteraction { .. }));
}

#[test]
fn rejects_duplicate_ids() {
    let interactions = vec![msg("m0", "A", &["B"], 0), msg("m0", "B", &["A"], 1)];
    assert!(MetaGraphBuilder::new().build(&interactions).is_err());
}

#[test]
fn equal_timestamps_are_ordered_by_id() {
    let sorted = vec![msg("a", "A", &["B"], 0), msg("b", "B", &["C"], 0)];
    let graph = MetaGraphBuilder::new().build(&sorted).unwrap();
    assert!(graph.cost_by_id("a", "b").is_some());

    let reversed = vec![msg("b", "B", &["C"], 0), msg("a", "A", &["B"], 0)];
    assert!(MetaGraphBuilder::new().build(&reversed).is_err());
}

#[test]
fn build_unsorted_sorts_first() {
    let interactions = vec![
        msg("msg2", "B", &["C"], 2),
        msg("msg0", "A", &["B"], 0),
        msg("msg1", "B", &["A"], 1),
    ];
    let graph = MetaGraphBuilder::new().build_unsorted(interactions).unwrap();
    assert_eq!(graph.edge_count(), 2);
    assert!(dag_enforcement::respects_time_order(&graph));
}

#[test]
fn nodes_keep_sender_and_recipients() {
    let interactions = vec![msg("m0", "A", &["B", "C"], 0)];
    let graph = MetaGraphBuilder::new().build(&interactions).unwrap();
    let node = graph.node_by_id("m0").unwrap();
    assert_eq!(node.sender, "A");
    assert_eq!(node.recipients, vec!["B".to_string(), "C".to_string()]);
    assert_eq!(node.timestamp, ts(0));
}
