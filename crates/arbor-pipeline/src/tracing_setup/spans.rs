//! Span definitions per stage: graph building, sampling, extraction.

/// Create a graph-building span.
#[macro_export]
macro_rules! graph_span {
    ($interactions:expr) => {
        tracing::info_span!("arbor.graph", interactions = $interactions)
    };
}

/// Create a span around one extraction run.
#[macro_export]
macro_rules! run_span {
    ($sampler:expr, $candidates:expr) => {
        tracing::info_span!("arbor.run", sampler = %$sampler, candidates = $candidates)
    };
}

/// Create a span around one root's extraction.
#[macro_export]
macro_rules! extraction_span {
    ($root:expr, $method:expr) => {
        tracing::debug_span!("arbor.extraction", root = %$root, method = ?$method)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const GRAPH: &str = "arbor.graph";
    pub const RUN: &str = "arbor.run";
    pub const EXTRACTION: &str = "arbor.extraction";
}
