#![cfg_attr(docsrs, feature(doc_cfg))]
//! # bout-topology
//!
//! bout-topology decomposes the logically rectangular `(x, y)` index space of a BOUT++ tokamak grid into named rectangular regions. It also records how those regions connect across separatrices, X-points and the core periodicity.
//!
//! ## Features
//! - Classification of the magnetic topology (core, SOL, limiter, single null, connected and disconnected double null, X-point) from breakpoint metadata
//! - Breakpoint normalisation that clamps the raw values and accounts for boundary cells present in, or stripped from, the stored arrays
//! - Declarative per-topology region tables and a bidirectional, name-keyed adjacency graph
//! - A minimal labeled-array [`Dataset`](data::Dataset) that shares one [`RegionSet`](topology::RegionSet) across all its variables
//! - Per-region extraction with guard cells communicated from neighbouring regions
//!
//! ## Usage
//!
//! ```
//! use bout_topology::prelude::*;
//!
//! let meta = MeshMetadata::new()
//!     .with("nx", 4)
//!     .with("ny", 8)
//!     .with("ny_inner", 4)
//!     .with("ixseps1", 10)
//!     .with("ixseps2", 10)
//!     .with("jyseps1_1", -1)
//!     .with("jyseps2_1", 3)
//!     .with("jyseps1_2", 3)
//!     .with("jyseps2_2", 7)
//!     .with("MXG", 2)
//!     .with("MYG", 2)
//!     .with("keep_xboundaries", 1)
//!     .with("keep_yboundaries", 0);
//!
//! let regions = create_regions(&meta)?;
//! assert_eq!(regions.topology(), Topology::Core);
//! assert_eq!(regions.get("core").unwrap().connection(Edge::Upper), Some("core"));
//! # Ok::<(), MeshError>(())
//! ```
//!
//! ## Invariant checking
//! Region sets are checked for a gap-free partition and mirrored links when
//! they are built. Debug builds, or the `strict-invariants` and
//! `check-invariants` features, also assert these checks through
//! [`DebugInvariants`] when a set is attached to a dataset.

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::extract::{ExtractOptions, from_all_regions, from_region};
    pub use crate::data::dataset::{Dataset, Variable, VariableView};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::builder::{
        RegionBuildOptions, build_regions, build_regions_for_tag, create_regions,
    };
    pub use crate::topology::classify::{Topology, classify};
    pub use crate::topology::metadata::{MeshMetadata, MeshParams, MetaValue};
    pub use crate::topology::region::{Edge, Region, RegionSlice};
    pub use crate::topology::region_set::RegionSet;
    pub use crate::topology::validation::{EmptyRegionHandling, RegionValidationOptions};
}
