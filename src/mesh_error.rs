//! MeshError: Unified error type for bout-topology public APIs
//!
//! Every fallible operation in the crate (metadata lookup, topology
//! classification, region construction and validation, region extraction)
//! reports failures through this enum instead of panicking.

use crate::topology::region::Edge;
use thiserror::Error;

/// Unified error type for region-decomposition operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A topology tag that no region table exists for.
    #[error("Topology '{0}' is not implemented")]
    UnsupportedTopology(String),
    /// Derived region bounds do not form a partition of the domain.
    #[error("Invalid mesh geometry: {0}")]
    InvalidMeshGeometry(String),
    /// A required metadata key was absent.
    #[error("Metadata key `{0}` is missing")]
    MissingMetadata(String),
    /// A metadata key holds a value of the wrong kind.
    #[error("Metadata key `{key}` is not {expected}")]
    MetadataType { key: String, expected: &'static str },
    /// Metadata JSON could not be decoded.
    #[error("Could not decode metadata: {0}")]
    MetadataJson(String),
    /// Region lookup by name failed.
    #[error("Region `{0}` not found")]
    RegionNotFound(String),
    /// A connection names a region that is not part of the set.
    #[error("Region `{region}` connects {edge} to unknown region `{target}`")]
    DanglingConnection {
        region: String,
        edge: Edge,
        target: String,
    },
    /// `A -> B` exists on one edge but `B -> A` is missing on the opposite edge.
    #[error("Region `{region}` connects {edge} to `{target}` but the reverse link is missing")]
    AsymmetricConnection {
        region: String,
        edge: Edge,
        target: String,
    },
    /// Linked regions do not share a seam of matching extent.
    #[error("Regions `{region}` and `{target}` are linked {edge} but their bounds do not meet")]
    IncompatibleConnection {
        region: String,
        edge: Edge,
        target: String,
    },
    /// A region covers no cells.
    #[error("Region `{0}` is empty")]
    EmptyRegion(String),
    /// Variable lookup on a dataset failed.
    #[error("Variable `{0}` not found")]
    VariableNotFound(String),
    /// A variable lacks the named dimension.
    #[error("Variable `{variable}` has no dimension `{dim}`")]
    DimensionNotFound { variable: String, dim: String },
    /// Data shape disagrees with the declared dimensions.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    /// Guard cells were requested but the data does not exist.
    #[error("Region `{region}` has no guard data on its {edge} edge (width {width})")]
    GuardOutOfBounds {
        region: String,
        edge: Edge,
        width: usize,
    },
    /// Region extraction attempted before a region set was attached.
    #[error("No region set attached to dataset")]
    NoRegions,
}

impl From<serde_json::Error> for MeshError {
    fn from(e: serde_json::Error) -> Self {
        MeshError::MetadataJson(e.to_string())
    }
}
