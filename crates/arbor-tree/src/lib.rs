//! # arbor-tree
//!
//! Finds the maximum-prize rooted subtree of a (binarized) DAG whose total
//! edge cost stays within a budget.
//!
//! - [`lst::LagrangianTreeSolver`]: Lagrangian relaxation walked across the
//!   breakpoints of the cost multiplier, followed by greedy completion.
//! - [`dp_general::BudgetedTreeDp`]: exact DP over a discretized budget with a
//!   pluggable edge cost.
//! - [`bound::upper_bound`]: cheap node-count bound used to rank roots.

pub mod arborescence;
pub mod bound;
pub mod dp_general;
pub mod lst;
pub mod roots;

pub use arborescence::Arborescence;
pub use bound::upper_bound;
pub use dp_general::{BudgetedTreeDp, EdgeAttributeCost, IEdgeCost, VarianceCost};
pub use lst::{LagrangianTreeSolver, SolveReport};
