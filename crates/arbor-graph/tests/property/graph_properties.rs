//! Property tests for meta-graph construction, pruning, and binarization.

use std::collections::HashSet;

use arbor_core::Interaction;
use arbor_graph::graph::dag_enforcement;
use arbor_graph::{binarize, unbinarize, MetaGraph, MetaGraphBuilder, SubgraphPruner};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

/// Interactions among `people` participants, one per second, in order.
fn interactions_strategy() -> impl Strategy<Value = Vec<Interaction>> {
    prop::collection::vec((0..6usize, prop::collection::vec(0..6usize, 0..4)), 1..40).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (sender, recipients))| {
                    Interaction::new(
                        format!("m{i:03}"),
                        format!("u{sender}"),
                        recipients.into_iter().map(|r| format!("u{r}")).collect(),
                        Utc.timestamp_opt(1_000_000_000 + i as i64, 0).unwrap(),
                    )
                })
                .collect()
        },
    )
}

fn build(interactions: &[Interaction]) -> MetaGraph {
    MetaGraphBuilder::new().build(interactions).unwrap()
}

proptest! {
    #[test]
    fn meta_graph_is_acyclic_and_time_ordered(interactions in interactions_strategy()) {
        let graph = build(&interactions);
        prop_assert!(dag_enforcement::is_acyclic(&graph));
        prop_assert!(dag_enforcement::find_cycles(&graph).is_empty());
        prop_assert!(dag_enforcement::respects_time_order(&graph));
    }

    #[test]
    fn each_slot_registration_feeds_at_most_one_descendant(
        interactions in interactions_strategy(),
    ) {
        let graph = build(&interactions);
        for interaction in &interactions {
            let mut identities: HashSet<&str> =
                interaction.recipients.iter().map(String::as_str).collect();
            identities.insert(interaction.sender.as_str());
            let idx = graph.get_node(&interaction.id).unwrap();
            prop_assert!(
                graph.out_degree(idx) <= identities.len(),
                "{} has {} children but only {} slots",
                interaction.id,
                graph.out_degree(idx),
                identities.len()
            );
        }
    }

    #[test]
    fn pruned_subgraph_stays_inside_window(
        interactions in interactions_strategy(),
        span in 0i64..20,
        pick in any::<prop::sample::Index>(),
    ) {
        let graph = build(&interactions);
        let root = &interactions[pick.index(interactions.len())];
        let sub = SubgraphPruner::new(Duration::seconds(span))
            .prune(&graph, &root.id)
            .unwrap();
        for node in sub.graph.graph.node_weights() {
            prop_assert!(node.timestamp >= root.timestamp);
            prop_assert!(node.timestamp <= root.timestamp + Duration::seconds(span));
        }
        let roots = dag_enforcement::roots(&sub.graph);
        prop_assert_eq!(roots.len(), 1);
    }

    #[test]
    fn binarize_round_trip_preserves_edges(interactions in interactions_strategy()) {
        let mut graph = build(&interactions);
        for (i, edge) in graph.graph.edge_weights_mut().enumerate() {
            edge.cost = (i % 5) as f64 * 0.25;
        }
        let binary = binarize(&graph);
        for idx in binary.graph.node_indices() {
            prop_assert!(binary.out_degree(idx) <= 2);
        }
        let restored = unbinarize(&binary);
        prop_assert_eq!(restored.edge_list(), graph.edge_list());
        prop_assert_eq!(restored.total_prize(), graph.total_prize());
    }
}
