/// Meta-graph construction and graph manipulation errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid interaction {id}: {reason}")]
    InvalidInteraction { id: String, reason: String },

    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("cycle detected in meta graph: {path}")]
    CycleDetected { path: String },

    #[error("snapshot inconsistency: {details}")]
    SnapshotInconsistency { details: String },
}
