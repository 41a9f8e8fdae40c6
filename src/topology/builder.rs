//! Region construction.
//!
//! [`build_regions`] normalises the breakpoints once, instantiates the
//! topology's region table against them, wires up the links and validates
//! the result. The same routine serves every topology; only the table
//! from [`layout`] differs.

use crate::mesh_error::MeshError;
use crate::topology::breakpoints::Breakpoints;
use crate::topology::classify::{Topology, classify};
use crate::topology::layout::{LinkKind, TopologyLayout, layout};
use crate::topology::metadata::{MeshMetadata, MeshParams};
use crate::topology::region::{Edge, Region};
use crate::topology::region_set::RegionSet;
use crate::topology::validation::{RegionValidationOptions, validate_region_set};

/// Options for region construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionBuildOptions {
    pub validation: RegionValidationOptions,
}

fn index(name: &str, what: &str, value: i64) -> Result<usize, MeshError> {
    usize::try_from(value).map_err(|_| {
        MeshError::InvalidMeshGeometry(format!("region `{name}` has negative {what} bound {value}"))
    })
}

fn instantiate(
    topology: Topology,
    table: TopologyLayout,
    bp: &Breakpoints,
) -> Result<RegionSet, MeshError> {
    let mut regions = Vec::with_capacity(table.regions.len());
    for spec in table.regions {
        let x_inner = index(spec.name, "x", bp.x(spec.x.0))?;
        let x_outer = index(spec.name, "x", bp.x(spec.x.1))?;
        let y_lower = index(spec.name, "y", bp.y(spec.y.0))?;
        let y_upper = index(spec.name, "y", bp.y(spec.y.1))?;
        regions.push(Region::new(spec.name, x_inner..x_outer, y_lower..y_upper));
    }

    for link in table.links {
        let (forward, reverse) = match link.kind {
            LinkKind::X => (Edge::Outer, Edge::Inner),
            LinkKind::Y => (Edge::Upper, Edge::Lower),
        };
        let from = regions
            .iter()
            .position(|r| r.name == link.from)
            .ok_or_else(|| MeshError::RegionNotFound(link.from.to_string()))?;
        let to = regions
            .iter()
            .position(|r| r.name == link.to)
            .ok_or_else(|| MeshError::RegionNotFound(link.to.to_string()))?;
        regions[from].set_connection(forward, link.to);
        regions[to].set_connection(reverse, link.from);
    }

    RegionSet::new(topology, regions)
}

/// Build regions for `topology` from typed parameters.
pub fn regions_from_params(
    topology: Topology,
    params: &MeshParams,
    options: &RegionBuildOptions,
) -> Result<RegionSet, MeshError> {
    let bp = Breakpoints::from_params(params);
    let nx = usize::try_from(bp.nx).map_err(|_| {
        MeshError::InvalidMeshGeometry(format!("negative x extent {} after boundary removal", bp.nx))
    })?;
    let ny = usize::try_from(bp.ny)
        .map_err(|_| MeshError::InvalidMeshGeometry(format!("negative y extent {}", bp.ny)))?;

    let regions = instantiate(topology, layout(topology), &bp)?;
    validate_region_set(&regions, nx, ny, options.validation)?;

    log::debug!(
        "built {} regions for {topology} topology on a {nx}x{ny} domain",
        regions.len()
    );
    Ok(regions)
}

/// Build the regions of `topology` with default options.
pub fn build_regions(topology: Topology, metadata: &MeshMetadata) -> Result<RegionSet, MeshError> {
    build_regions_with(topology, metadata, &RegionBuildOptions::default())
}

pub fn build_regions_with(
    topology: Topology,
    metadata: &MeshMetadata,
    options: &RegionBuildOptions,
) -> Result<RegionSet, MeshError> {
    let params = MeshParams::from_metadata(metadata)?;
    regions_from_params(topology, &params, options)
}

/// Build regions for a topology given by its tag spelling.
///
/// Fails with [`MeshError::UnsupportedTopology`] for unknown tags.
pub fn build_regions_for_tag(tag: &str, metadata: &MeshMetadata) -> Result<RegionSet, MeshError> {
    build_regions(tag.parse()?, metadata)
}

/// Classify `metadata` and build the matching regions.
pub fn create_regions(metadata: &MeshMetadata) -> Result<RegionSet, MeshError> {
    let topology = classify(metadata)?;
    build_regions(topology, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::validation::EmptyRegionHandling;

    fn core_meta() -> MeshMetadata {
        MeshMetadata::new()
            .with("nx", 4)
            .with("ny", 8)
            .with("ny_inner", 4)
            .with("ixseps1", 10)
            .with("ixseps2", 10)
            .with("jyseps1_1", -1)
            .with("jyseps2_1", 3)
            .with("jyseps1_2", 3)
            .with("jyseps2_2", 7)
            .with("MXG", 0)
            .with("MYG", 0)
            .with("keep_xboundaries", 1)
            .with("keep_yboundaries", 0)
    }

    #[test]
    fn core_is_one_self_linked_region() {
        let set = create_regions(&core_meta()).unwrap();
        assert_eq!(set.topology(), Topology::Core);
        assert_eq!(set.len(), 1);
        let core = set.get("core").unwrap();
        assert_eq!((core.x_range(), core.y_range()), (0..4, 0..8));
        assert_eq!(core.connection(Edge::Lower), Some("core"));
        assert_eq!(core.connection(Edge::Upper), Some("core"));
        assert_eq!(core.connection(Edge::Inner), None);
        assert_eq!(core.connection(Edge::Outer), None);
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let err = build_regions_for_tag("snowflake", &core_meta()).unwrap_err();
        assert_eq!(err, MeshError::UnsupportedTopology("snowflake".into()));
    }

    #[test]
    fn mismatched_topology_breaks_partition() {
        // a limiter table on core-like metadata leaves the SOL empty, which
        // is tolerated, but strict validation rejects it
        let meta = core_meta();
        build_regions(Topology::Limiter, &meta).unwrap();
        let strict = RegionBuildOptions {
            validation: RegionValidationOptions {
                empty_regions: EmptyRegionHandling::Error,
                ..Default::default()
            },
        };
        let err = build_regions_with(Topology::Limiter, &meta, &strict).unwrap_err();
        assert_eq!(err, MeshError::EmptyRegion("SOL".into()));
    }

    #[test]
    fn negative_bounds_are_invalid_geometry() {
        // dropping more boundary cells than the separatrix index leaves a
        // negative breakpoint
        let meta = core_meta()
            .with("ixseps1", 1)
            .with("ixseps2", 1)
            .with("MXG", 2)
            .with("nx", 8)
            .with("keep_xboundaries", 0);
        let err = build_regions(Topology::Limiter, &meta).unwrap_err();
        assert!(matches!(err, MeshError::InvalidMeshGeometry(_)));
    }

    #[test]
    fn unordered_legs_are_invalid_geometry() {
        // jyseps1_1 above jyseps2_1 inverts the inner core band
        let meta = core_meta()
            .with("nx", 12)
            .with("ny", 24)
            .with("ny_inner", 12)
            .with("ixseps1", 5)
            .with("ixseps2", 9)
            .with("jyseps1_1", 9)
            .with("jyseps2_1", 4)
            .with("jyseps1_2", 15)
            .with("jyseps2_2", 20);
        assert_eq!(classify(&meta).unwrap(), Topology::DisconnectedDoubleNull);
        let err = create_regions(&meta).unwrap_err();
        assert!(matches!(err, MeshError::InvalidMeshGeometry(_)), "{err}");
    }

    #[test]
    fn huge_guard_counts_do_not_overflow() {
        let meta = core_meta()
            .with("MYG", i64::MAX / 3)
            .with("keep_yboundaries", 1);
        let err = create_regions(&meta).unwrap_err();
        assert!(matches!(err, MeshError::InvalidMeshGeometry(_)), "{err}");

        let err = create_regions(&core_meta().with("MXG", -2)).unwrap_err();
        assert!(matches!(err, MeshError::MetadataType { ref key, .. } if key == "MXG"));
    }

    #[test]
    fn missing_key_propagates() {
        let mut meta = MeshMetadata::new();
        for (k, v) in core_meta().iter().filter(|(k, _)| *k != "MYG") {
            meta.insert(k, v.clone());
        }
        let err = create_regions(&meta).unwrap_err();
        assert_eq!(err, MeshError::MissingMetadata("MYG".into()));
    }
}
