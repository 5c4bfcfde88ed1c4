//! Property tests for adaptive sampling over built meta-graphs.

use std::sync::Arc;

use arbor_core::{Interaction, NodeScoreKind};
use arbor_graph::{binarize, MetaGraphBuilder, SubgraphPruner};
use arbor_sampler::{AdaptiveSampler, RootSampler, Rooting};
use arbor_tree::LagrangianTreeSolver;
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

fn interactions_strategy() -> impl Strategy<Value = Vec<Interaction>> {
    prop::collection::vec((0..5usize, prop::collection::vec(0..5usize, 0..3)), 1..25).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (sender, recipients))| {
                    Interaction::new(
                        format!("m{i:03}"),
                        format!("u{sender}"),
                        recipients.into_iter().map(|r| format!("u{r}")).collect(),
                        Utc.timestamp_opt(1_000_000_000 + 10 * i as i64, 0).unwrap(),
                    )
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn explore_probability_never_rises(
        interactions in interactions_strategy(),
        seed in 0u64..1_000,
        budget in 0.0..5.0f64,
    ) {
        let graph = MetaGraphBuilder::new().build(&interactions).unwrap();
        let rooting = Rooting::new(Arc::new(graph), SubgraphPruner::new(Duration::seconds(60)));
        let mut sampler =
            AdaptiveSampler::new(rooting, budget, Box::new(NodeScoreKind::Density), seed);
        let solver = LagrangianTreeSolver::new(2);

        let mut last = sampler.explore_proba();
        for _ in 0..(interactions.len() * 4) {
            let exploring_done = sampler.roots_to_explore().next().is_none();
            let Some(sample) = sampler.take() else {
                break;
            };
            if exploring_done {
                prop_assert!(sampler.score(&sample.root).is_some());
            }
            let tree = solver
                .solve(&binarize(&sample.subgraph.graph), &sample.root, budget)
                .ok()
                .map(|t| t.unbinarize());
            sampler.update(&sample.root, tree.as_ref());

            let proba = sampler.explore_proba();
            prop_assert!(proba <= last);
            last = proba;
        }
    }
}
