pub mod defaults;
mod extraction_config;
mod graph_config;
mod observability_config;
mod sampling_config;

pub use extraction_config::{ExtractionConfig, ExtractionMethod, RootPolicy};
pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;
pub use sampling_config::{SamplingConfig, SamplingMethod};

use serde::{Deserialize, Serialize};

use crate::errors::{ArborError, ArborResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    pub graph: GraphConfig,
    pub extraction: ExtractionConfig,
    pub sampling: SamplingConfig,
    pub observability: ObservabilityConfig,
}

impl ArborConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> ArborResult<Self> {
        let config: ArborConfig = toml::from_str(source).map_err(|e| ArborError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a TOML file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> ArborResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ArborError::IoError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    /// Reject values the extraction loop cannot work with.
    pub fn validate(&self) -> ArborResult<()> {
        let invalid = |reason: &str| {
            Err(ArborError::ConfigError {
                reason: reason.to_string(),
            })
        };
        if !self.extraction.budget.is_finite() || self.extraction.budget < 0.0 {
            return invalid("extraction.budget must be a finite, non-negative number");
        }
        if self.extraction.decimal_precision > defaults::MAX_DECIMAL_PRECISION {
            return invalid("extraction.decimal_precision is too large");
        }
        if !(0.0..=1.0).contains(&self.sampling.candidate_percent) {
            return invalid("sampling.candidate_percent must lie in [0, 1]");
        }
        if !self.graph.default_prize.is_finite() || self.graph.default_prize < 0.0 {
            return invalid("graph.default_prize must be a finite, non-negative number");
        }
        if self.sampling.method == SamplingMethod::Deterministic && self.sampling.roots.is_empty() {
            return invalid("deterministic sampling requires sampling.roots");
        }
        Ok(())
    }
}
