use std::sync::Arc;

use arbor_core::config::{SamplingConfig, SamplingMethod};
use arbor_graph::{MetaGraph, SubgraphPruner};
use tracing::info;

use crate::adaptive::AdaptiveSampler;
use crate::deterministic::DeterministicSampler;
use crate::random::RandomSampler;
use crate::rooting::{RootSampler, Rooting};
use crate::upper_bound::UpperBoundSampler;

/// Build the sampler named by `config.method` over `graph`.
pub fn sampler_from_config(
    config: &SamplingConfig,
    graph: Arc<MetaGraph>,
    pruner: SubgraphPruner,
    budget: f64,
) -> Box<dyn RootSampler> {
    let rooting = Rooting::new(graph, pruner);
    let sampler: Box<dyn RootSampler> = match config.method {
        SamplingMethod::Random => Box::new(RandomSampler::new(rooting, config.seed)),
        SamplingMethod::Deterministic => {
            Box::new(DeterministicSampler::new(rooting, config.roots.iter().cloned()))
        }
        SamplingMethod::UpperBound => Box::new(UpperBoundSampler::new(rooting, budget)),
        SamplingMethod::Adaptive => Box::new(AdaptiveSampler::new(
            rooting,
            budget,
            Box::new(config.node_score),
            config.seed,
        )),
    };
    info!(sampler = sampler.name(), "root sampler ready");
    sampler
}
