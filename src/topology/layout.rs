//! Per-topology region tables.
//!
//! Each topology is described declaratively: a list of named rectangles
//! whose bounds are symbolic breakpoints, and a list of links between
//! them. [`crate::topology::builder`] turns a table into concrete
//! [`Region`](crate::topology::region::Region)s once the breakpoints have
//! been normalised.

use crate::topology::breakpoints::{XBreak, YBreak};
use crate::topology::classify::Topology;

use crate::topology::breakpoints::XBreak::{End as XE, Sep1, Sep2, Start as XS};
use crate::topology::breakpoints::YBreak::{
    End as YE, InnerOuterSplit, LowerInnerLeg, LowerOuterLeg, Start as YS, UpperInnerLeg,
    UpperOuterLeg,
};

/// One named rectangle of a topology table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSpec {
    pub name: &'static str,
    pub x: (XBreak, XBreak),
    pub y: (YBreak, YBreak),
}

/// Direction of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `from` is inner, `to` is outer.
    X,
    /// `from` is lower, `to` is upper.
    Y,
}

/// Adjacency between two regions of a table.
///
/// Applying a link sets the forward connection on `from` and the reverse
/// connection on `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    pub from: &'static str,
    pub to: &'static str,
}

/// Region table and wiring for one topology.
#[derive(Debug, Clone, Copy)]
pub struct TopologyLayout {
    pub regions: &'static [RegionSpec],
    pub links: &'static [Link],
}

const fn r(name: &'static str, x: (XBreak, XBreak), y: (YBreak, YBreak)) -> RegionSpec {
    RegionSpec { name, x, y }
}

const fn x(from: &'static str, to: &'static str) -> Link {
    Link {
        kind: LinkKind::X,
        from,
        to,
    }
}

const fn y(from: &'static str, to: &'static str) -> Link {
    Link {
        kind: LinkKind::Y,
        from,
        to,
    }
}

// poloidal bands shared by the double-null tables
const LOWER_INNER: (YBreak, YBreak) = (YS, LowerInnerLeg);
const INNER: (YBreak, YBreak) = (LowerInnerLeg, UpperInnerLeg);
const UPPER_INNER: (YBreak, YBreak) = (UpperInnerLeg, InnerOuterSplit);
const UPPER_OUTER: (YBreak, YBreak) = (InnerOuterSplit, UpperOuterLeg);
const OUTER: (YBreak, YBreak) = (UpperOuterLeg, LowerOuterLeg);
const LOWER_OUTER: (YBreak, YBreak) = (LowerOuterLeg, YE);

static DISCONNECTED_DOUBLE_NULL: [RegionSpec; 18] = [
    r("lower_inner_PFR", (XS, Sep1), LOWER_INNER),
    r("lower_inner_intersep", (Sep1, Sep2), LOWER_INNER),
    r("lower_inner_SOL", (Sep2, XE), LOWER_INNER),
    r("inner_core", (XS, Sep1), INNER),
    r("inner_intersep", (Sep1, Sep2), INNER),
    r("inner_SOL", (Sep2, XE), INNER),
    r("upper_inner_PFR", (XS, Sep1), UPPER_INNER),
    r("upper_inner_intersep", (Sep1, Sep2), UPPER_INNER),
    r("upper_inner_SOL", (Sep2, XE), UPPER_INNER),
    r("upper_outer_PFR", (XS, Sep1), UPPER_OUTER),
    r("upper_outer_intersep", (Sep1, Sep2), UPPER_OUTER),
    r("upper_outer_SOL", (Sep2, XE), UPPER_OUTER),
    r("outer_core", (XS, Sep1), OUTER),
    r("outer_intersep", (Sep1, Sep2), OUTER),
    r("outer_SOL", (Sep2, XE), OUTER),
    r("lower_outer_PFR", (XS, Sep1), LOWER_OUTER),
    r("lower_outer_intersep", (Sep1, Sep2), LOWER_OUTER),
    r("lower_outer_SOL", (Sep2, XE), LOWER_OUTER),
];

static DISCONNECTED_DOUBLE_NULL_LINKS: [Link; 24] = [
    x("lower_inner_PFR", "lower_inner_intersep"),
    x("lower_inner_intersep", "lower_inner_SOL"),
    x("inner_core", "inner_intersep"),
    x("inner_intersep", "inner_SOL"),
    x("upper_inner_PFR", "upper_inner_intersep"),
    x("upper_inner_intersep", "upper_inner_SOL"),
    x("upper_outer_PFR", "upper_outer_intersep"),
    x("upper_outer_intersep", "upper_outer_SOL"),
    x("outer_core", "outer_intersep"),
    x("outer_intersep", "outer_SOL"),
    x("lower_outer_PFR", "lower_outer_intersep"),
    x("lower_outer_intersep", "lower_outer_SOL"),
    y("lower_inner_PFR", "lower_outer_PFR"),
    y("lower_inner_intersep", "inner_intersep"),
    y("lower_inner_SOL", "inner_SOL"),
    y("inner_core", "outer_core"),
    y("outer_core", "inner_core"),
    y("inner_intersep", "outer_intersep"),
    y("inner_SOL", "upper_inner_SOL"),
    y("upper_outer_intersep", "upper_inner_intersep"),
    y("upper_outer_PFR", "upper_inner_PFR"),
    y("upper_outer_SOL", "outer_SOL"),
    y("outer_intersep", "lower_outer_intersep"),
    y("outer_SOL", "lower_outer_SOL"),
];

static CONNECTED_DOUBLE_NULL: [RegionSpec; 12] = [
    r("lower_inner_PFR", (XS, Sep1), LOWER_INNER),
    r("lower_inner_SOL", (Sep2, XE), LOWER_INNER),
    r("inner_core", (XS, Sep1), INNER),
    r("inner_SOL", (Sep2, XE), INNER),
    r("upper_inner_PFR", (XS, Sep1), UPPER_INNER),
    r("upper_inner_SOL", (Sep2, XE), UPPER_INNER),
    r("upper_outer_PFR", (XS, Sep1), UPPER_OUTER),
    r("upper_outer_SOL", (Sep2, XE), UPPER_OUTER),
    r("outer_core", (XS, Sep1), OUTER),
    r("outer_SOL", (Sep2, XE), OUTER),
    r("lower_outer_PFR", (XS, Sep1), LOWER_OUTER),
    r("lower_outer_SOL", (Sep2, XE), LOWER_OUTER),
];

static CONNECTED_DOUBLE_NULL_LINKS: [Link; 14] = [
    x("lower_inner_PFR", "lower_inner_SOL"),
    x("inner_core", "inner_SOL"),
    x("upper_inner_PFR", "upper_inner_SOL"),
    x("upper_outer_PFR", "upper_outer_SOL"),
    x("outer_core", "outer_SOL"),
    x("lower_outer_PFR", "lower_outer_SOL"),
    y("lower_inner_PFR", "lower_outer_PFR"),
    y("lower_inner_SOL", "inner_SOL"),
    y("inner_core", "outer_core"),
    y("outer_core", "inner_core"),
    y("inner_SOL", "upper_inner_SOL"),
    y("upper_outer_PFR", "upper_inner_PFR"),
    y("upper_outer_SOL", "outer_SOL"),
    y("outer_SOL", "lower_outer_SOL"),
];

// The SOL column starts at the inner separatrix in every band so the
// three poloidal bands tile the domain even when ixseps2 lies beyond nx.
static SINGLE_NULL: [RegionSpec; 6] = [
    r("inner_PFR", (XS, Sep1), (YS, LowerInnerLeg)),
    r("inner_SOL", (Sep1, XE), (YS, LowerInnerLeg)),
    r("core", (XS, Sep1), (LowerInnerLeg, LowerOuterLeg)),
    r("SOL", (Sep1, XE), (LowerInnerLeg, LowerOuterLeg)),
    r("outer_PFR", (XS, Sep1), (LowerOuterLeg, YE)),
    r("outer_SOL", (Sep1, XE), (LowerOuterLeg, YE)),
];

static SINGLE_NULL_LINKS: [Link; 7] = [
    x("inner_PFR", "inner_SOL"),
    x("core", "SOL"),
    x("outer_PFR", "outer_SOL"),
    y("inner_PFR", "outer_PFR"),
    y("inner_SOL", "SOL"),
    y("core", "core"),
    y("SOL", "outer_SOL"),
];

static LIMITER: [RegionSpec; 2] = [
    r("core", (XS, Sep1), (YS, YE)),
    r("SOL", (Sep1, XE), (YS, YE)),
];

static LIMITER_LINKS: [Link; 2] = [x("core", "SOL"), y("core", "core")];

static CORE: [RegionSpec; 1] = [r("core", (XS, XE), (YS, YE))];

static CORE_LINKS: [Link; 1] = [y("core", "core")];

static SOL: [RegionSpec; 1] = [r("sol", (XS, XE), (YS, YE))];

static XPOINT: [RegionSpec; 8] = [
    r("lower_inner_PFR", (XS, Sep1), (YS, LowerInnerLeg)),
    r("lower_inner_SOL", (Sep1, XE), (YS, LowerInnerLeg)),
    r("upper_inner_PFR", (XS, Sep1), (LowerInnerLeg, InnerOuterSplit)),
    r("upper_inner_SOL", (Sep1, XE), (LowerInnerLeg, InnerOuterSplit)),
    r("upper_outer_PFR", (XS, Sep1), (InnerOuterSplit, LowerOuterLeg)),
    r("upper_outer_SOL", (Sep1, XE), (InnerOuterSplit, LowerOuterLeg)),
    r("lower_outer_PFR", (XS, Sep1), (LowerOuterLeg, YE)),
    r("lower_outer_SOL", (Sep1, XE), (LowerOuterLeg, YE)),
];

static XPOINT_LINKS: [Link; 8] = [
    x("lower_inner_PFR", "lower_inner_SOL"),
    x("upper_inner_PFR", "upper_inner_SOL"),
    x("upper_outer_PFR", "upper_outer_SOL"),
    x("lower_outer_PFR", "lower_outer_SOL"),
    y("lower_inner_PFR", "lower_outer_PFR"),
    y("lower_inner_SOL", "upper_inner_SOL"),
    y("upper_outer_PFR", "upper_inner_PFR"),
    y("upper_outer_SOL", "lower_outer_SOL"),
];

/// Table for `topology`.
pub fn layout(topology: Topology) -> TopologyLayout {
    let (regions, links): (&'static [RegionSpec], &'static [Link]) = match topology {
        Topology::DisconnectedDoubleNull => {
            (&DISCONNECTED_DOUBLE_NULL, &DISCONNECTED_DOUBLE_NULL_LINKS)
        }
        Topology::ConnectedDoubleNull => (&CONNECTED_DOUBLE_NULL, &CONNECTED_DOUBLE_NULL_LINKS),
        Topology::SingleNull => (&SINGLE_NULL, &SINGLE_NULL_LINKS),
        Topology::Limiter => (&LIMITER, &LIMITER_LINKS),
        Topology::Core => (&CORE, &CORE_LINKS),
        Topology::Sol => (&SOL, &[]),
        Topology::Xpoint => (&XPOINT, &XPOINT_LINKS),
    };
    TopologyLayout { regions, links }
}
