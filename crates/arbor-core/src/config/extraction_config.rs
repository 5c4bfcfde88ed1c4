use serde::{Deserialize, Serialize};

use super::defaults;

// chrono rejects spans beyond i64::MAX milliseconds.
const MAX_TIMESPAN_SECS: u64 = (i64::MAX / 1_000) as u64;

/// Which tree solver runs on each rooted subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Lagrangian relaxation over the binarized DAG.
    #[default]
    Lst,
    /// Exact integer-budget DP with a variance-style edge cost.
    Variance,
}

/// What to do when a tree has more than one in-degree-zero node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    #[default]
    Warn,
    Reject,
}

/// Per-root extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum total edge cost of an extracted tree.
    pub budget: f64,
    /// Width of the window following the root's timestamp.
    pub timespan_secs: u64,
    /// Multiplier breakpoints closer than `10^-decimal_precision` (relative) are merged.
    pub decimal_precision: u32,
    pub method: ExtractionMethod,
    /// Decimal digits kept when the variance DP discretizes costs.
    pub fixed_point: u32,
    /// Reduce each rooted subgraph to its shortest-path tree before solving.
    pub shortest_path: bool,
    pub root_policy: RootPolicy,
}

impl ExtractionConfig {
    pub fn timespan(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.timespan_secs.min(MAX_TIMESPAN_SECS) as i64)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            budget: defaults::DEFAULT_BUDGET,
            timespan_secs: defaults::DEFAULT_TIMESPAN_SECS,
            decimal_precision: defaults::DEFAULT_DECIMAL_PRECISION,
            method: ExtractionMethod::default(),
            fixed_point: defaults::DEFAULT_FIXED_POINT,
            shortest_path: defaults::DEFAULT_SHORTEST_PATH,
            root_policy: RootPolicy::default(),
        }
    }
}
