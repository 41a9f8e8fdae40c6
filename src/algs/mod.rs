//! Algorithms on region sets.

pub mod extract;

pub use extract::{ExtractOptions, from_all_regions, from_region};
