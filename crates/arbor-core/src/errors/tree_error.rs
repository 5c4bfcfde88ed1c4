/// Tree extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("root {root} has no reachable descendants within the timespan")]
    EmptySubgraph { root: String },

    #[error("no tree fits under budget {budget}")]
    InfeasibleBudget { budget: f64 },

    #[error("root not found in graph: {root}")]
    RootNotFound { root: String },

    #[error("multiple roots detected: {}", roots.join(", "))]
    MultipleRootsDetected { roots: Vec<String> },

    #[error("not an arborescence: {reason}")]
    NotAnArborescence { reason: String },

    #[error("graph is not binary: node {id} has {children} children")]
    NotBinary { id: String, children: usize },
}
