//! Flat, name-indexed collection of regions.

use crate::mesh_error::MeshError;
use crate::topology::classify::Topology;
use crate::topology::region::{Edge, Region};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All regions of one mesh, in table order, with lookup by name.
///
/// Connections are stored as names on each [`Region`]; resolving one goes
/// back through the set, so self- and cross-links need no shared ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegionSetRepr", into = "RegionSetRepr")]
pub struct RegionSet {
    topology: Topology,
    regions: Vec<Region>,
    index: BTreeMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct RegionSetRepr {
    topology: Topology,
    regions: Vec<Region>,
}

impl TryFrom<RegionSetRepr> for RegionSet {
    type Error = MeshError;

    fn try_from(repr: RegionSetRepr) -> Result<Self, Self::Error> {
        RegionSet::new(repr.topology, repr.regions)
    }
}

impl From<RegionSet> for RegionSetRepr {
    fn from(set: RegionSet) -> Self {
        RegionSetRepr {
            topology: set.topology,
            regions: set.regions,
        }
    }
}

impl RegionSet {
    /// Collects `regions`, rejecting duplicate names.
    pub fn new(topology: Topology, regions: Vec<Region>) -> Result<Self, MeshError> {
        let mut index = BTreeMap::new();
        for (i, region) in regions.iter().enumerate() {
            if index.insert(region.name.clone(), i).is_some() {
                return Err(MeshError::InvalidMeshGeometry(format!(
                    "duplicate region name `{}`",
                    region.name
                )));
            }
        }
        Ok(Self {
            topology,
            regions,
            index,
        })
    }

    /// Topology the regions were built for.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.index.get(name).map(|&i| &self.regions[i])
    }

    /// Like [`RegionSet::get`] but reports a missing name as an error.
    pub fn try_get(&self, name: &str) -> Result<&Region, MeshError> {
        self.get(name)
            .ok_or_else(|| MeshError::RegionNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Regions in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    /// The region across `edge` of `name`, if any.
    pub fn neighbour(&self, name: &str, edge: Edge) -> Result<Option<&Region>, MeshError> {
        let region = self.try_get(name)?;
        match region.connection(edge) {
            None => Ok(None),
            Some(target) => self.get(target).map(Some).ok_or_else(|| {
                MeshError::DanglingConnection {
                    region: name.to_string(),
                    edge,
                    target: target.to_string(),
                }
            }),
        }
    }

    /// Smallest rectangle containing every region, as `(nx, ny)`.
    pub fn extent(&self) -> (usize, usize) {
        self.regions.iter().fold((0, 0), |(nx, ny), r| {
            (nx.max(r.x_outer), ny.max(r.y_upper))
        })
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
