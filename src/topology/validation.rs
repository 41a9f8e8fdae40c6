//! Region-set validation helpers.
//!
//! A region set is only usable for per-region extraction when its
//! rectangles tile the domain and its links agree in both directions.

use crate::mesh_error::MeshError;
use crate::topology::region::{Edge, Region};
use crate::topology::region_set::RegionSet;
use itertools::Itertools;

/// Optional validation toggles for region-set checks.
#[derive(Debug, Clone, Copy)]
pub struct RegionValidationOptions {
    /// Ensure the regions are disjoint and cover `[0, nx) × [0, ny)`.
    pub check_partition: bool,
    /// Ensure every link resolves and is mirrored with matching bounds.
    pub check_connections: bool,
    /// How to handle regions covering no cells.
    pub empty_regions: EmptyRegionHandling,
}

impl RegionValidationOptions {
    /// Enable all checks and reject empty regions.
    pub fn all() -> Self {
        Self {
            check_partition: true,
            check_connections: true,
            empty_regions: EmptyRegionHandling::Error,
        }
    }
}

impl Default for RegionValidationOptions {
    fn default() -> Self {
        Self {
            check_partition: true,
            check_connections: true,
            empty_regions: EmptyRegionHandling::Warn,
        }
    }
}

/// Behavior for zero-area regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyRegionHandling {
    /// Skip empty-region detection.
    Ignore,
    /// Log a warning on empty regions.
    Warn,
    /// Return an error on empty regions.
    Error,
}

/// Validate `regions` against a `nx × ny` domain.
pub fn validate_region_set(
    regions: &RegionSet,
    nx: usize,
    ny: usize,
    options: RegionValidationOptions,
) -> Result<(), MeshError> {
    validate_empty(regions, options.empty_regions)?;
    if options.check_partition {
        validate_partition(regions, nx, ny)?;
    }
    if options.check_connections {
        validate_connections(regions)?;
    }
    Ok(())
}

fn validate_empty(regions: &RegionSet, handling: EmptyRegionHandling) -> Result<(), MeshError> {
    if handling == EmptyRegionHandling::Ignore {
        return Ok(());
    }
    for region in regions.iter().filter(|r| r.is_empty()) {
        match handling {
            EmptyRegionHandling::Warn => {
                log::warn!(
                    "Empty region detected: name={} x={:?} y={:?}",
                    region.name,
                    region.x_range(),
                    region.y_range()
                );
            }
            EmptyRegionHandling::Error => {
                return Err(MeshError::EmptyRegion(region.name.clone()));
            }
            EmptyRegionHandling::Ignore => {}
        }
    }
    Ok(())
}

fn overlaps(a: &Region, b: &Region) -> bool {
    a.x_inner < b.x_outer
        && b.x_inner < a.x_outer
        && a.y_lower < b.y_upper
        && b.y_lower < a.y_upper
}

/// Check that the regions are in-bounds, pairwise disjoint and cover the
/// whole domain. Disjoint in-bounds rectangles cover the domain exactly
/// when their areas sum to `nx * ny`.
pub fn validate_partition(regions: &RegionSet, nx: usize, ny: usize) -> Result<(), MeshError> {
    for r in regions {
        if r.x_inner > r.x_outer || r.y_lower > r.y_upper {
            return Err(MeshError::InvalidMeshGeometry(format!(
                "region `{}` has inverted bounds x={}..{} y={}..{}",
                r.name, r.x_inner, r.x_outer, r.y_lower, r.y_upper
            )));
        }
        if r.x_outer > nx || r.y_upper > ny {
            return Err(MeshError::InvalidMeshGeometry(format!(
                "region `{}` extends past the {nx}x{ny} domain",
                r.name
            )));
        }
    }

    if let Some((a, b)) = regions
        .iter()
        .tuple_combinations()
        .find(|(a, b)| overlaps(a, b))
    {
        return Err(MeshError::InvalidMeshGeometry(format!(
            "regions `{}` and `{}` overlap",
            a.name, b.name
        )));
    }

    let too_large =
        || MeshError::InvalidMeshGeometry(format!("{nx}x{ny} domain exceeds the index range"));
    let total = nx.checked_mul(ny).ok_or_else(too_large)?;
    let covered = regions
        .iter()
        .try_fold(0usize, |acc, r| {
            r.nx().checked_mul(r.ny()).and_then(|a| acc.checked_add(a))
        })
        .ok_or_else(too_large)?;
    if covered != total {
        return Err(MeshError::InvalidMeshGeometry(format!(
            "regions cover {covered} cells of a {nx}x{ny} domain"
        )));
    }
    Ok(())
}

/// Check that every connection resolves, is mirrored on the opposite edge
/// of its target, and that linked regions share their seam.
pub fn validate_connections(regions: &RegionSet) -> Result<(), MeshError> {
    for region in regions {
        for (edge, target_name) in region.connections() {
            let target = regions
                .get(target_name)
                .ok_or_else(|| MeshError::DanglingConnection {
                    region: region.name.clone(),
                    edge,
                    target: target_name.to_string(),
                })?;

            if target.connection(edge.opposite()) != Some(region.name.as_str()) {
                return Err(MeshError::AsymmetricConnection {
                    region: region.name.clone(),
                    edge,
                    target: target_name.to_string(),
                });
            }

            let compatible = match edge {
                Edge::Outer => {
                    region.x_outer == target.x_inner && region.y_range() == target.y_range()
                }
                Edge::Inner => {
                    region.x_inner == target.x_outer && region.y_range() == target.y_range()
                }
                // y-neighbours need not be contiguous in the global array
                Edge::Lower | Edge::Upper => region.x_range() == target.x_range(),
            };
            if !compatible {
                return Err(MeshError::IncompatibleConnection {
                    region: region.name.clone(),
                    edge,
                    target: target_name.to_string(),
                });
            }
        }
    }
    Ok(())
}
