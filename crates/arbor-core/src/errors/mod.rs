mod graph_error;
mod sampler_error;
mod tree_error;

pub use graph_error::GraphError;
pub use sampler_error::SamplerError;
pub use tree_error::TreeError;

/// Top-level error for every Arbor operation.
#[derive(Debug, thiserror::Error)]
pub enum ArborError {
    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("tree error: {0}")]
    TreeError(#[from] TreeError),

    #[error("sampler error: {0}")]
    SamplerError(#[from] SamplerError),

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("io error at {path}: {reason}")]
    IoError { path: String, reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ArborError {
    /// Whether the extraction loop may skip the offending root and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ArborError::TreeError(
                TreeError::EmptySubgraph { .. }
                    | TreeError::InfeasibleBudget { .. }
                    | TreeError::MultipleRootsDetected { .. }
            ) | ArborError::SamplerError(SamplerError::NoCandidateAvailable { .. })
        )
    }
}

pub type ArborResult<T> = Result<T, ArborError>;
