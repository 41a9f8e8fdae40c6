//! Per-region extraction with guard-cell communication.
//!
//! Extracting a region selects its cells from the global array and, on
//! every edge with a neighbour, appends that neighbour's cells adjoining
//! the seam as guard cells. x-neighbours are contiguous in the global
//! array; y-neighbours generally are not (the two ends of a divertor leg,
//! the wrap-around of the core), which is why guard values have to be
//! fetched from the neighbour rather than read off the next rows.
//!
//! Edges without a neighbour are true boundaries and get no guard cells,
//! even when a non-zero width is requested: any boundary cells present in
//! the stored arrays already lie inside the region bounds. Requesting
//! guards therefore never fails on an unconnected edge; only a neighbour
//! too thin to supply the width, or a band outside the array, is an error.

use crate::data::dataset::{Dataset, Variable};
use crate::mesh_error::MeshError;
use crate::topology::region::{Edge, Region};
use crate::topology::region_set::RegionSet;
use ndarray::{ArrayD, Axis, Slice, concatenate};
use std::collections::BTreeMap;
use std::ops::Range;

/// Guard widths for extraction; `None` falls back to the dataset's `MXG`/`MYG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub mxg: Option<usize>,
    pub myg: Option<usize>,
}

impl ExtractOptions {
    pub fn with_guards(mxg: usize, myg: usize) -> Self {
        Self {
            mxg: Some(mxg),
            myg: Some(myg),
        }
    }
}

fn guard_width(ds: &Dataset, explicit: Option<usize>, key: &str) -> Result<usize, MeshError> {
    match explicit {
        Some(w) => Ok(w),
        None => {
            let w = ds.metadata().get_int(key)?;
            usize::try_from(w).map_err(|_| MeshError::MetadataType {
                key: key.to_string(),
                expected: "a non-negative integer",
            })
        }
    }
}

struct Axes {
    x: Axis,
    y: Axis,
    nx: usize,
    ny: usize,
}

fn select(data: &ArrayD<f64>, axes: &Axes, x: Range<usize>, y: Range<usize>) -> ArrayD<f64> {
    let mut view = data.view();
    view.slice_axis_inplace(axes.x, Slice::from(x));
    view.slice_axis_inplace(axes.y, Slice::from(y));
    view.to_owned()
}

fn join(axis: Axis, parts: &[ArrayD<f64>]) -> Result<ArrayD<f64>, MeshError> {
    let views: Vec<_> = parts.iter().map(|p| p.view()).collect();
    concatenate(axis, &views).map_err(|e| MeshError::ShapeMismatch(e.to_string()))
}

/// Band of `width` cells that `neighbour` contributes across `edge` of
/// `region`, checked against the neighbour's size and the array bounds.
fn neighbour_band(
    region: &Region,
    neighbour: &Region,
    edge: Edge,
    width: usize,
    axes: &Axes,
) -> Result<(Range<usize>, Range<usize>), MeshError> {
    let out_of_bounds = || MeshError::GuardOutOfBounds {
        region: region.name.clone(),
        edge,
        width,
    };
    let depth = if edge.is_x() { neighbour.nx() } else { neighbour.ny() };
    if depth < width {
        return Err(out_of_bounds());
    }
    neighbour
        .edge_band(edge.opposite(), width)
        .within(axes.nx, axes.ny)
        .ok_or_else(out_of_bounds)
}

fn region_data(
    regions: &RegionSet,
    region: &Region,
    var: &Variable,
    axes: &Axes,
    mxg: usize,
    myg: usize,
) -> Result<ArrayD<f64>, MeshError> {
    let data = var.data();

    // interior plus communicated x-guards
    let mut parts = Vec::with_capacity(3);
    if mxg > 0 {
        if let Some(nb) = regions.neighbour(&region.name, Edge::Inner)? {
            let (x, y) = neighbour_band(region, nb, Edge::Inner, mxg, axes)?;
            parts.push(select(data, axes, x, y));
        }
    }
    parts.push(select(data, axes, region.x_range(), region.y_range()));
    if mxg > 0 {
        if let Some(nb) = regions.neighbour(&region.name, Edge::Outer)? {
            let (x, y) = neighbour_band(region, nb, Edge::Outer, mxg, axes)?;
            parts.push(select(data, axes, x, y));
        }
    }
    let middle = join(axes.x, &parts)?;

    if myg == 0 {
        return Ok(middle);
    }

    // y-guards span the x-range widened at connected x-edges
    let widened = region.slices(mxg, 0);
    let x_span = widened
        .within(axes.nx, axes.ny)
        .map(|(x, _)| x)
        .ok_or_else(|| MeshError::GuardOutOfBounds {
            region: region.name.clone(),
            edge: if widened.x.start < 0 { Edge::Inner } else { Edge::Outer },
            width: mxg,
        })?;

    let mut parts = Vec::with_capacity(3);
    if let Some(nb) = regions.neighbour(&region.name, Edge::Lower)? {
        let (_, y) = neighbour_band(region, nb, Edge::Lower, myg, axes)?;
        parts.push(select(data, axes, x_span.clone(), y));
    }
    parts.push(middle);
    if let Some(nb) = regions.neighbour(&region.name, Edge::Upper)? {
        let (_, y) = neighbour_band(region, nb, Edge::Upper, myg, axes)?;
        parts.push(select(data, axes, x_span, y));
    }
    join(axes.y, &parts)
}

/// Extract `region_name` of `variable`, communicating `mxg`/`myg` guard
/// cells from neighbouring regions.
///
/// The result keeps the variable's dimensions and attributes and gains a
/// `region` attribute naming the region.
pub fn from_region(
    ds: &Dataset,
    variable: &str,
    region_name: &str,
    options: &ExtractOptions,
) -> Result<Variable, MeshError> {
    let regions = ds.regions().ok_or(MeshError::NoRegions)?;
    let var = ds.variable(variable)?;
    let region = regions.try_get(region_name)?;

    let dim_error = |dim: &str| MeshError::DimensionNotFound {
        variable: variable.to_string(),
        dim: dim.to_string(),
    };
    let x = var.axis(ds.x_dim()).ok_or_else(|| dim_error(ds.x_dim()))?;
    let y = var.axis(ds.y_dim()).ok_or_else(|| dim_error(ds.y_dim()))?;
    let axes = Axes {
        x,
        y,
        nx: var.data().len_of(x),
        ny: var.data().len_of(y),
    };
    if region.x_outer > axes.nx || region.y_upper > axes.ny {
        return Err(MeshError::ShapeMismatch(format!(
            "region `{}` ends at ({}, {}) but `{variable}` is {}x{}",
            region.name, region.x_outer, region.y_upper, axes.nx, axes.ny
        )));
    }

    let mxg = guard_width(ds, options.mxg, "MXG")?;
    let myg = guard_width(ds, options.myg, "MYG")?;

    let data = region_data(regions, region, var, &axes, mxg, myg)?;
    let mut out = var.with_data(data);
    out.set_attr("region", region.name.as_str());
    Ok(out)
}

/// Extract every region of `variable`, keyed by region name.
///
/// With the `rayon` feature the regions are extracted in parallel; the
/// first error encountered is returned either way.
pub fn from_all_regions(
    ds: &Dataset,
    variable: &str,
    options: &ExtractOptions,
) -> Result<BTreeMap<String, Variable>, MeshError> {
    let regions = ds.regions().ok_or(MeshError::NoRegions)?;
    let names: Vec<&str> = regions.names().collect();
    let extract = |name: &str| -> Result<(String, Variable), MeshError> {
        Ok((name.to_string(), from_region(ds, variable, name, options)?))
    };

    #[cfg(feature = "rayon")]
    let extracted = {
        use rayon::prelude::*;
        names.into_par_iter().map(extract).collect()
    };
    #[cfg(not(feature = "rayon"))]
    let extracted = names.into_iter().map(extract).collect();
    extracted
}
