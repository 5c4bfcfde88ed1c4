use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::SamplerError;
use crate::traits::NodeScoreKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMethod {
    #[default]
    Random,
    UpperBound,
    Deterministic,
    Adaptive,
}

impl SamplingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingMethod::Random => "random",
            SamplingMethod::UpperBound => "upperbound",
            SamplingMethod::Deterministic => "deterministic",
            SamplingMethod::Adaptive => "adaptive",
        }
    }
}

impl std::str::FromStr for SamplingMethod {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(SamplingMethod::Random),
            "upperbound" => Ok(SamplingMethod::UpperBound),
            "deterministic" => Ok(SamplingMethod::Deterministic),
            "adaptive" => Ok(SamplingMethod::Adaptive),
            other => Err(SamplerError::UnknownMethod {
                name: other.to_string(),
            }),
        }
    }
}

/// Root sampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub method: SamplingMethod,
    /// Subtree score used by the adaptive sampler.
    pub node_score: NodeScoreKind,
    pub seed: u64,
    /// Absolute number of candidate trees. Takes precedence over the percentage.
    pub candidate_count: Option<usize>,
    /// Fraction of graph nodes to extract trees for.
    pub candidate_percent: f64,
    /// Ordered roots for deterministic sampling.
    pub roots: Vec<String>,
}

impl SamplingConfig {
    /// Number of candidate trees to extract from a graph of `node_count` nodes.
    pub fn candidate_budget(&self, node_count: usize) -> usize {
        match self.candidate_count {
            Some(n) => n,
            None => (node_count as f64 * self.candidate_percent).ceil() as usize,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            method: SamplingMethod::default(),
            node_score: NodeScoreKind::default(),
            seed: defaults::DEFAULT_SEED,
            candidate_count: None,
            candidate_percent: defaults::DEFAULT_CANDIDATE_PERCENT,
            roots: Vec::new(),
        }
    }
}
