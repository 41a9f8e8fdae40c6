//! Top-level module for mesh topology and region decomposition.
//!
//! This module provides:
//! - [`metadata`]: scalar mesh metadata and its typed view
//! - [`classify`]: naming the magnetic topology from breakpoint coincidences
//! - [`breakpoints`] and [`layout`]: normalised breakpoints and the
//!   declarative per-topology region tables
//! - [`region`], [`region_set`]: the rectangular regions and their adjacency
//! - [`builder`], [`validation`]: constructing and checking region sets
//!
//! Most users only need [`create_regions`], which classifies the metadata
//! and builds the matching [`RegionSet`].

pub mod breakpoints;
pub mod builder;
pub mod classify;
pub mod layout;
pub mod metadata;
pub mod region;
pub mod region_set;
pub mod validation;

pub use builder::{
    RegionBuildOptions, build_regions, build_regions_for_tag, build_regions_with, create_regions,
};
pub use classify::{Topology, classify};
pub use metadata::{MeshMetadata, MeshParams, MetaValue};
pub use region::{Edge, Region, RegionSlice};
pub use region_set::RegionSet;
