mod distance;
mod node_score;

pub use distance::{DistanceKind, IDistance};
pub use node_score::{INodeScorer, NodeScoreKind};
