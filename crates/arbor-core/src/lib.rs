//! # arbor-core
//!
//! Foundation crate for the Arbor story-tree extractor.
//! Defines the interaction model, capability traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ArborConfig;
pub use errors::{ArborError, ArborResult};
pub use models::Interaction;
pub use traits::{DistanceKind, IDistance, INodeScorer, NodeScoreKind};
