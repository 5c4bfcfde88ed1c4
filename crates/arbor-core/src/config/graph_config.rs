use serde::{Deserialize, Serialize};

use super::defaults;
use crate::traits::DistanceKind;

/// Meta-graph weighting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Prize of a node whose interaction carries no override.
    pub default_prize: f64,
    /// Distance between endpoint topic vectors, used as edge cost.
    pub distance: DistanceKind,
    /// Discount edge costs by `alpha * tau^(dt * time_scale)`.
    pub consider_recency: bool,
    pub alpha: f64,
    pub tau: f64,
    /// Multiplier applied to the gap in seconds before the recency term.
    pub time_scale: f64,
    /// Drop edges spanning more than this many seconds.
    pub preprune_secs: Option<u64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            default_prize: defaults::DEFAULT_PRIZE,
            distance: DistanceKind::default(),
            consider_recency: defaults::DEFAULT_CONSIDER_RECENCY,
            alpha: defaults::DEFAULT_ALPHA,
            tau: defaults::DEFAULT_TAU,
            time_scale: defaults::DEFAULT_TIME_SCALE,
            preprune_secs: None,
        }
    }
}
