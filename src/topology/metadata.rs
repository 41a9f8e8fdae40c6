//! Scalar mesh metadata.
//!
//! A simulation dump carries its grid description as a bag of named
//! scalars (`nx`, `ixseps1`, `MXG`, ...). [`MeshMetadata`] stores that bag
//! as loaded; [`MeshParams`] is the typed snapshot of the keys the
//! topology engine needs, extracted once with [`MeshParams::from_metadata`].

use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single metadata scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<i32> for MetaValue {
    fn from(v: i32) -> Self {
        MetaValue::Int(i64::from(v))
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Float(v)
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Text(v.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::Text(v)
    }
}

impl MetaValue {
    /// Integer view: integers, integral floats and booleans (as 0/1).
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            MetaValue::Int(v) => Some(v),
            MetaValue::Bool(b) => Some(i64::from(b)),
            MetaValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
            _ => None,
        }
    }

    /// Flag view: booleans, and integers where any non-zero value is true.
    pub fn as_flag(&self) -> Option<bool> {
        match *self {
            MetaValue::Bool(b) => Some(b),
            MetaValue::Int(v) => Some(v != 0),
            MetaValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(f != 0.0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Key/value store of scalar metadata, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshMetadata {
    values: BTreeMap<String, MetaValue>,
}

impl MeshMetadata {
    /// Creates an empty metadata map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<MetaValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts `value` under `key`, returning the previous value, if any.
    pub fn insert(&mut self, key: &str, value: impl Into<MetaValue>) -> Option<MetaValue> {
        self.values.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, key: &str) -> Result<&MetaValue, MeshError> {
        self.values
            .get(key)
            .ok_or_else(|| MeshError::MissingMetadata(key.to_string()))
    }

    /// Integer lookup; fails on a missing key or a non-integral value.
    pub fn get_int(&self, key: &str) -> Result<i64, MeshError> {
        self.require(key)?
            .as_int()
            .ok_or_else(|| MeshError::MetadataType {
                key: key.to_string(),
                expected: "an integer",
            })
    }

    /// Integer lookup restricted to values `>= 0`.
    pub fn get_count(&self, key: &str) -> Result<i64, MeshError> {
        let v = self.get_int(key)?;
        if v < 0 {
            return Err(MeshError::MetadataType {
                key: key.to_string(),
                expected: "a non-negative integer",
            });
        }
        Ok(v)
    }

    /// 0/1 flag lookup; fails on a missing key or a non-numeric value.
    pub fn get_flag(&self, key: &str) -> Result<bool, MeshError> {
        self.require(key)?
            .as_flag()
            .ok_or_else(|| MeshError::MetadataType {
                key: key.to_string(),
                expected: "a flag",
            })
    }

    /// Optional string lookup; absent keys yield `None`.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, MeshError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(v) => v.as_str().map(Some).ok_or_else(|| MeshError::MetadataType {
                key: key.to_string(),
                expected: "a string",
            }),
        }
    }

    /// Loads metadata from a flat JSON object of scalars.
    pub fn from_json_str(json: &str) -> Result<Self, MeshError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, MeshError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for MeshMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Typed snapshot of the metadata keys consumed by classification and
/// region construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshParams {
    pub nx: i64,
    pub ny: i64,
    pub ny_inner: i64,
    pub ixseps1: i64,
    pub ixseps2: i64,
    pub jyseps1_1: i64,
    pub jyseps2_1: i64,
    pub jyseps1_2: i64,
    pub jyseps2_2: i64,
    pub mxg: i64,
    pub myg: i64,
    pub keep_xboundaries: bool,
    pub keep_yboundaries: bool,
}

impl MeshParams {
    /// Reads every required key, failing on the first missing or mistyped one.
    pub fn from_metadata(metadata: &MeshMetadata) -> Result<Self, MeshError> {
        Ok(Self {
            nx: metadata.get_int("nx")?,
            ny: metadata.get_int("ny")?,
            ny_inner: metadata.get_int("ny_inner")?,
            ixseps1: metadata.get_int("ixseps1")?,
            ixseps2: metadata.get_int("ixseps2")?,
            jyseps1_1: metadata.get_int("jyseps1_1")?,
            jyseps2_1: metadata.get_int("jyseps2_1")?,
            jyseps1_2: metadata.get_int("jyseps1_2")?,
            jyseps2_2: metadata.get_int("jyseps2_2")?,
            mxg: metadata.get_count("MXG")?,
            myg: metadata.get_count("MYG")?,
            keep_xboundaries: metadata.get_flag("keep_xboundaries")?,
            keep_yboundaries: metadata.get_flag("keep_yboundaries")?,
        })
    }

    /// Writes the parameters back as metadata scalars.
    pub fn to_metadata(&self) -> MeshMetadata {
        MeshMetadata::new()
            .with("nx", self.nx)
            .with("ny", self.ny)
            .with("ny_inner", self.ny_inner)
            .with("ixseps1", self.ixseps1)
            .with("ixseps2", self.ixseps2)
            .with("jyseps1_1", self.jyseps1_1)
            .with("jyseps2_1", self.jyseps2_1)
            .with("jyseps1_2", self.jyseps1_2)
            .with("jyseps2_2", self.jyseps2_2)
            .with("MXG", self.mxg)
            .with("MYG", self.myg)
            .with("keep_xboundaries", i64::from(self.keep_xboundaries))
            .with("keep_yboundaries", i64::from(self.keep_yboundaries))
    }
}
