//! # arbor-pipeline
//!
//! End-to-end candidate tree generation:
//!
//! interactions → meta-graph → weighting → (per sampled root) pruning →
//! optional shortest-path reduction → binarization → budgeted solve →
//! unbinarization → sampler feedback.

pub mod generator;
pub mod graph_stage;
pub mod results;
pub mod tracing_setup;

pub use generator::{CandidateTree, CandidateTreeGenerator, RunReport};
pub use graph_stage::{build_meta_graph, cache_meta_graph};
pub use results::{load_interactions_json, load_results, save_results};
