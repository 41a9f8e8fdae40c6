//! Data containers for mesh field variables.
//!
//! - [`dataset::Dataset`]: named variables, scalar metadata and the
//!   attached region set
//! - [`dataset::Variable`]: an `ndarray` array with named dimensions

pub mod dataset;

pub use dataset::{Dataset, Variable, VariableView};
