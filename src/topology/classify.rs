//! Topology classification from separatrix and x-point breakpoints.
//!
//! The seven supported topologies are told apart purely by coincidences
//! between the breakpoint indices. The cases are not mutually exclusive on
//! their own, so the checks in [`Topology::from_params`] are ordered and
//! the first match wins.

use crate::mesh_error::MeshError;
use crate::topology::metadata::{MeshMetadata, MeshParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Magnetic topology of a tokamak grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// Closed field lines only; periodic in y.
    Core,
    /// Open field lines only.
    Sol,
    /// Core plus scrape-off layer with no divertor legs.
    Limiter,
    /// One lower x-point.
    SingleNull,
    /// Two x-points on the same flux surface.
    ConnectedDoubleNull,
    /// Two x-points on different flux surfaces.
    DisconnectedDoubleNull,
    /// Isolated x-point with four legs and no core.
    Xpoint,
}

impl Topology {
    /// Every supported topology, in classification-table order.
    pub const ALL: [Topology; 7] = [
        Topology::DisconnectedDoubleNull,
        Topology::ConnectedDoubleNull,
        Topology::SingleNull,
        Topology::Limiter,
        Topology::Core,
        Topology::Sol,
        Topology::Xpoint,
    ];

    /// Tag spelling used in metadata and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::Core => "core",
            Topology::Sol => "sol",
            Topology::Limiter => "limiter",
            Topology::SingleNull => "single-null",
            Topology::ConnectedDoubleNull => "connected-double-null",
            Topology::DisconnectedDoubleNull => "disconnected-double-null",
            Topology::Xpoint => "xpoint",
        }
    }

    /// Classify already-extracted mesh parameters.
    ///
    /// Uses the raw (unclamped) breakpoints as stored in the metadata.
    pub fn from_params(p: &MeshParams) -> Topology {
        if p.jyseps2_1 == p.jyseps1_2 {
            // no upper x-point
            if p.jyseps1_1 <= 0 && p.jyseps2_2 >= p.ny - 1 {
                let ix = p.ixseps1.min(p.ixseps2);
                return if ix >= p.nx - 1 {
                    Topology::Core
                } else if ix <= 0 {
                    Topology::Sol
                } else {
                    Topology::Limiter
                };
            }
            return Topology::SingleNull;
        }

        if p.jyseps1_1 == p.jyseps2_1 && p.jyseps1_2 == p.jyseps2_2 {
            return Topology::Xpoint;
        }

        if p.ixseps1 == p.ixseps2 {
            return Topology::ConnectedDoubleNull;
        }

        Topology::DisconnectedDoubleNull
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topology::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MeshError::UnsupportedTopology(s.to_string()))
    }
}

/// Name the topology described by `metadata`.
///
/// Fails only when a required key is missing or mistyped.
pub fn classify(metadata: &MeshMetadata) -> Result<Topology, MeshError> {
    let params = MeshParams::from_metadata(metadata)?;
    let topology = Topology::from_params(&params);
    log::debug!(
        "classified mesh nx={} ny={} ixseps=({}, {}) as {topology}",
        params.nx,
        params.ny,
        params.ixseps1,
        params.ixseps2
    );
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ixs: (i64, i64), jys: (i64, i64, i64, i64)) -> MeshParams {
        MeshParams {
            nx: 10,
            ny: 20,
            ny_inner: 10,
            ixseps1: ixs.0,
            ixseps2: ixs.1,
            jyseps1_1: jys.0,
            jyseps2_1: jys.1,
            jyseps1_2: jys.2,
            jyseps2_2: jys.3,
            mxg: 2,
            myg: 2,
            keep_xboundaries: false,
            keep_yboundaries: false,
        }
    }

    #[test]
    fn no_leg_cases_split_on_separatrix() {
        let jys = (-1, 9, 9, 19);
        assert_eq!(Topology::from_params(&params((10, 10), jys)), Topology::Core);
        assert_eq!(Topology::from_params(&params((9, 12), jys)), Topology::Core);
        assert_eq!(Topology::from_params(&params((0, 10), jys)), Topology::Sol);
        assert_eq!(Topology::from_params(&params((5, 10), jys)), Topology::Limiter);
    }

    #[test]
    fn legs_without_upper_xpoint_are_single_null() {
        let t = Topology::from_params(&params((5, 5), (2, 9, 9, 16)));
        assert_eq!(t, Topology::SingleNull);
    }

    #[test]
    fn coincident_pairs_are_xpoint() {
        let t = Topology::from_params(&params((5, 5), (4, 4, 14, 14)));
        assert_eq!(t, Topology::Xpoint);
    }

    #[test]
    fn double_null_split_on_separatrix_equality() {
        let jys = (2, 7, 12, 17);
        assert_eq!(
            Topology::from_params(&params((5, 5), jys)),
            Topology::ConnectedDoubleNull
        );
        assert_eq!(
            Topology::from_params(&params((5, 7), jys)),
            Topology::DisconnectedDoubleNull
        );
    }

    #[test]
    fn tags_round_trip_through_from_str() {
        for t in Topology::ALL {
            assert_eq!(t.as_str().parse::<Topology>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
        assert_eq!(
            "triple-null".parse::<Topology>().unwrap_err(),
            MeshError::UnsupportedTopology("triple-null".into())
        );
    }

    #[test]
    fn serde_uses_tag_spelling() {
        let json = serde_json::to_string(&Topology::DisconnectedDoubleNull).unwrap();
        assert_eq!(json, "\"disconnected-double-null\"");
    }
}
