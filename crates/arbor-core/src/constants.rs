/// Arbor version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Id prefix of the synthetic nodes introduced by binarization.
pub const DUMMY_PREFIX: &str = "dummy-";

/// Hard cap on multiplier breakpoints visited by the Lagrangian solver. Past it
/// the solver jumps straight to the free-edge tree.
pub const MAX_LAGRANGE_ITERATIONS: usize = 4096;

/// Slack allowed when comparing accumulated float costs against a budget.
pub const COST_EPSILON: f64 = 1e-9;

/// Smoothing term for divergence-based distances.
pub const DIVERGENCE_SMOOTHING: f64 = 1e-12;
