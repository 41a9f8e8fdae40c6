//! Minimal labeled-array container.
//!
//! A [`Dataset`] holds named variables (an `ndarray` array plus dimension
//! names and attributes), the scalar mesh metadata and, once attached, the
//! single [`RegionSet`] shared by every variable. Variables never store
//! their own copy of the regions; [`VariableView`] resolves them through
//! the dataset.

use crate::mesh_error::MeshError;
use crate::topology::builder::create_regions;
use crate::topology::metadata::{MeshMetadata, MetaValue};
use crate::topology::region_set::RegionSet;
use ndarray::{ArrayD, Axis, Dimension, IxDyn};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Dimension names whose presence marks a variable as field data rather
/// than metadata.
const GRID_DIMS: [&str; 4] = ["t", "x", "y", "z"];

/// An array with named dimensions and scalar attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    dims: Vec<String>,
    data: ArrayD<f64>,
    attrs: BTreeMap<String, MetaValue>,
}

impl Variable {
    /// Wraps `data`, naming its axes in order.
    pub fn new<D: Dimension>(dims: &[&str], data: ndarray::Array<f64, D>) -> Result<Self, MeshError> {
        let data = data.into_dyn();
        if dims.len() != data.ndim() {
            return Err(MeshError::ShapeMismatch(format!(
                "{} dimension names for a {}-dimensional array",
                dims.len(),
                data.ndim()
            )));
        }
        Ok(Self {
            dims: dims.iter().map(|d| d.to_string()).collect(),
            data,
            attrs: BTreeMap::new(),
        })
    }

    /// A zero-dimensional variable.
    pub fn scalar(value: f64) -> Self {
        Self {
            dims: Vec::new(),
            data: ArrayD::from_elem(IxDyn(&[]), value),
            attrs: BTreeMap::new(),
        }
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Position of the axis named `dim`.
    pub fn axis(&self, dim: &str) -> Option<Axis> {
        self.dims.iter().position(|d| d == dim).map(Axis)
    }

    /// Length along the named dimension.
    pub fn len_of(&self, dim: &str) -> Option<usize> {
        self.axis(dim).map(|a| self.data.len_of(a))
    }

    pub fn attr(&self, key: &str) -> Option<&MetaValue> {
        self.attrs.get(key)
    }

    pub fn attrs(&self) -> &BTreeMap<String, MetaValue> {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<MetaValue>) -> Option<MetaValue> {
        self.attrs.insert(key.to_string(), value.into())
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<MetaValue> {
        self.attrs.remove(key)
    }

    /// Replaces the data, keeping dimension names and attributes.
    pub(crate) fn with_data(&self, data: ArrayD<f64>) -> Self {
        Self {
            dims: self.dims.clone(),
            data,
            attrs: self.attrs.clone(),
        }
    }

    fn is_grid_data(&self, extra: &[&str]) -> bool {
        self.dims
            .iter()
            .any(|d| GRID_DIMS.contains(&d.as_str()) || extra.contains(&d.as_str()))
    }
}

/// Named variables, scalar metadata and the shared region set.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    variables: BTreeMap<String, Variable>,
    metadata: MeshMetadata,
    regions: Option<Arc<RegionSet>>,
}

impl Dataset {
    pub fn new(metadata: MeshMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Collect `variables`, move scalar ones into `metadata`, then classify
    /// the mesh and attach its regions.
    pub fn open_with_regions<I>(variables: I, metadata: MeshMetadata) -> Result<Self, MeshError>
    where
        I: IntoIterator<Item = (String, Variable)>,
    {
        let mut ds = Self::new(metadata);
        for (name, var) in variables {
            ds.insert_variable(&name, var);
        }
        ds.strip_metadata();
        let regions = create_regions(&ds.metadata)?;
        ds.attach_regions(regions);
        Ok(ds)
    }

    pub fn metadata(&self) -> &MeshMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MeshMetadata {
        &mut self.metadata
    }

    /// Inserts `var`, returning any variable it replaced.
    pub fn insert_variable(&mut self, name: &str, var: Variable) -> Option<Variable> {
        self.variables.insert(name.to_string(), var)
    }

    pub fn variable(&self, name: &str) -> Result<&Variable, MeshError> {
        self.variables
            .get(name)
            .ok_or_else(|| MeshError::VariableNotFound(name.to_string()))
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Name of the radial dimension (`bout_xdim`, default `"x"`).
    pub fn x_dim(&self) -> &str {
        self.metadata
            .get("bout_xdim")
            .and_then(MetaValue::as_str)
            .unwrap_or("x")
    }

    /// Name of the poloidal dimension (`bout_ydim`, default `"y"`).
    pub fn y_dim(&self) -> &str {
        self.metadata
            .get("bout_ydim")
            .and_then(MetaValue::as_str)
            .unwrap_or("y")
    }

    /// Moves single-valued variables with no grid dimension into the
    /// metadata, returning their names.
    pub fn strip_metadata(&mut self) -> Vec<String> {
        let extra = [self.x_dim().to_string(), self.y_dim().to_string()];
        let extra: Vec<&str> = extra.iter().map(String::as_str).collect();
        let scalar: Vec<String> = self
            .variables
            .iter()
            .filter(|(_, v)| !v.is_grid_data(&extra) && v.data.len() == 1)
            .map(|(k, _)| k.clone())
            .collect();

        for name in &scalar {
            if let Some(var) = self.variables.remove(name) {
                if let Some(&value) = var.data.iter().next() {
                    let value = if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                        MetaValue::Int(value as i64)
                    } else {
                        MetaValue::Float(value)
                    };
                    self.metadata.insert(name, value);
                }
            }
        }
        if !scalar.is_empty() {
            log::debug!("moved {} scalar variables into metadata", scalar.len());
        }
        scalar
    }

    /// Attach `regions` as the one region set shared by all variables.
    pub fn attach_regions(&mut self, regions: RegionSet) -> Arc<RegionSet> {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        {
            use crate::debug_invariants::DebugInvariants;
            regions.debug_assert_invariants();
        }
        let regions = Arc::new(regions);
        if self.regions.replace(Arc::clone(&regions)).is_some() {
            log::warn!("replacing previously attached region set");
        }
        regions
    }

    pub fn regions(&self) -> Option<&Arc<RegionSet>> {
        self.regions.as_ref()
    }

    /// Read-only view of one variable together with the shared regions.
    pub fn view(&self, name: &str) -> Result<VariableView<'_>, MeshError> {
        let (name, variable) = self
            .variables
            .get_key_value(name)
            .ok_or_else(|| MeshError::VariableNotFound(name.to_string()))?;
        Ok(VariableView {
            name: name.as_str(),
            variable,
            dataset: self,
        })
    }
}

/// A variable borrowed from a [`Dataset`], resolving the region set by
/// reference.
#[derive(Debug, Clone, Copy)]
pub struct VariableView<'a> {
    name: &'a str,
    variable: &'a Variable,
    dataset: &'a Dataset,
}

impl<'a> VariableView<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn variable(&self) -> &'a Variable {
        self.variable
    }

    pub fn regions(&self) -> Option<&'a Arc<RegionSet>> {
        self.dataset.regions()
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }
}
