use serde::{Deserialize, Serialize};

/// Scores a subtree from its total prize and total edge cost.
///
/// Any `Fn(f64, f64) -> f64` closure is a scorer as well.
pub trait INodeScorer: Send + Sync {
    fn score(&self, prize_sum: f64, cost_sum: f64) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> INodeScorer for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn score(&self, prize_sum: f64, cost_sum: f64) -> f64 {
        self(prize_sum, cost_sum)
    }
}

/// Built-in subtree scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeScoreKind {
    /// `prize / cost`, infinite at zero cost.
    #[default]
    Density,
    /// `ln(prize + 1) * prize / cost`, infinite at zero cost.
    LogDensity,
}

impl NodeScoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeScoreKind::Density => "density",
            NodeScoreKind::LogDensity => "log_density",
        }
    }
}

impl INodeScorer for NodeScoreKind {
    fn score(&self, prize_sum: f64, cost_sum: f64) -> f64 {
        if cost_sum == 0.0 {
            return f64::INFINITY;
        }
        match self {
            NodeScoreKind::Density => prize_sum / cost_sum,
            NodeScoreKind::LogDensity => (prize_sum + 1.0).ln() * prize_sum / cost_sum,
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}
