//! # arbor-sampler
//!
//! Chooses which root to grow the next candidate tree from.
//!
//! Every sampler hands out a [`RootSample`]: a root id plus its time-windowed
//! subgraph. Samplers that learn from results get the extracted tree back
//! through [`RootSampler::update`].

pub mod adaptive;
pub mod deterministic;
pub mod factory;
pub mod random;
pub mod rooting;
pub mod scoring;
pub mod upper_bound;

pub use adaptive::AdaptiveSampler;
pub use deterministic::DeterministicSampler;
pub use factory::sampler_from_config;
pub use random::RandomSampler;
pub use rooting::{RootSample, RootSampler, Rooting};
pub use scoring::node_scores_from_tree;
pub use upper_bound::UpperBoundSampler;
