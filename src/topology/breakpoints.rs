//! Breakpoint normalisation.
//!
//! Region bounds are expressed in terms of a handful of radial and
//! poloidal breakpoints. Before they can be used, the raw values from the
//! metadata are clamped into range, put in order and shifted to account
//! for boundary cells that are (or are not) present in the stored arrays.
//! The steps in [`Breakpoints::from_params`] must run in the given order:
//! later clamps use limits produced by earlier ones. Arithmetic saturates,
//! so absurd inputs surface as invalid geometry rather than overflow.

use crate::topology::metadata::MeshParams;
use serde::{Deserialize, Serialize};

/// Radial breakpoint used as a region x-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XBreak {
    Start,
    /// Inner separatrix.
    Sep1,
    /// Outer separatrix.
    Sep2,
    End,
}

/// Poloidal breakpoint used as a region y-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YBreak {
    Start,
    /// `jyseps1_1 + 1`
    LowerInnerLeg,
    /// `jyseps2_1 + 1`
    UpperInnerLeg,
    /// `ny_inner`
    InnerOuterSplit,
    /// `jyseps1_2 + 1`
    UpperOuterLeg,
    /// `jyseps2_2 + 1`
    LowerOuterLeg,
    End,
}

/// Normalised breakpoints in the index space of the stored arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breakpoints {
    pub nx: i64,
    pub ny: i64,
    pub ixseps1: i64,
    pub ixseps2: i64,
    pub jyseps1_1: i64,
    pub jyseps2_1: i64,
    pub ny_inner: i64,
    pub jyseps1_2: i64,
    pub jyseps2_2: i64,
}

fn in_range(val: i64, lower: i64, upper: i64) -> i64 {
    if val < lower {
        lower
    } else if val > upper {
        upper
    } else {
        val
    }
}

fn order(lower: i64, upper: i64) -> (i64, i64) {
    if upper < lower {
        (upper, lower)
    } else {
        (lower, upper)
    }
}

impl Breakpoints {
    pub fn from_params(p: &MeshParams) -> Self {
        let mut nx = p.nx;
        let mut ny = p.ny;

        let ixs1 = in_range(p.ixseps1, 0, nx);
        let ixs2 = in_range(p.ixseps2, 0, nx);
        let (mut ixs1, mut ixs2) = order(ixs1, ixs2);

        let mut jys11 = in_range(p.jyseps1_1, 0, ny.saturating_sub(1));
        let jys21 = in_range(p.jyseps2_1, 0, ny.saturating_sub(1));
        let jys12 = in_range(p.jyseps1_2, 0, ny.saturating_sub(1));
        let (mut jys21, mut jys12) = order(jys21, jys12);
        let mut ny_inner = in_range(p.ny_inner, jys21.saturating_add(1), jys12.saturating_add(1));
        let mut jys22 = in_range(p.jyseps2_2, 0, ny.saturating_sub(1));

        if !p.keep_xboundaries {
            ixs1 = ixs1.saturating_sub(p.mxg);
            ixs2 = ixs2.saturating_sub(p.mxg);
            nx = nx.saturating_sub(p.mxg.saturating_mul(2));
        }

        // y crosses up to four boundary seams: lower inner target, upper
        // inner target, upper outer target, lower outer target
        let ybndry = if p.keep_yboundaries { p.myg } else { 0 };
        let shift = |v: i64, seams: i64| v.saturating_add(ybndry.saturating_mul(seams));
        jys11 = shift(jys11, 1);
        jys21 = shift(jys21, 1);
        ny_inner = shift(ny_inner, 2);
        jys12 = shift(jys12, 3);
        jys22 = shift(jys22, 3);
        ny = shift(ny, 4);

        Self {
            nx,
            ny,
            ixseps1: ixs1,
            ixseps2: ixs2,
            jyseps1_1: jys11,
            jyseps2_1: jys21,
            ny_inner,
            jyseps1_2: jys12,
            jyseps2_2: jys22,
        }
    }

    pub fn x(&self, b: XBreak) -> i64 {
        match b {
            XBreak::Start => 0,
            XBreak::Sep1 => self.ixseps1,
            XBreak::Sep2 => self.ixseps2,
            XBreak::End => self.nx,
        }
    }

    pub fn y(&self, b: YBreak) -> i64 {
        match b {
            YBreak::Start => 0,
            YBreak::LowerInnerLeg => self.jyseps1_1.saturating_add(1),
            YBreak::UpperInnerLeg => self.jyseps2_1.saturating_add(1),
            YBreak::InnerOuterSplit => self.ny_inner,
            YBreak::UpperOuterLeg => self.jyseps1_2.saturating_add(1),
            YBreak::LowerOuterLeg => self.jyseps2_2.saturating_add(1),
            YBreak::End => self.ny,
        }
    }
}
