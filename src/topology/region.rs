//! A single logically rectangular region of the global index space.
//!
//! Bounds are global indices into the stored arrays; x-ranges and y-ranges
//! are half-open. Neighbours are referenced by name so that a set of
//! regions can link to each other (and to themselves) without ownership
//! cycles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// One side of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Low-x side.
    Inner,
    /// High-x side.
    Outer,
    /// Low-y side.
    Lower,
    /// High-y side.
    Upper,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Inner, Edge::Outer, Edge::Lower, Edge::Upper];

    /// The side a neighbour across this edge must link back from.
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Inner => Edge::Outer,
            Edge::Outer => Edge::Inner,
            Edge::Lower => Edge::Upper,
            Edge::Upper => Edge::Lower,
        }
    }

    pub fn is_x(self) -> bool {
        matches!(self, Edge::Inner | Edge::Outer)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Edge::Inner => "inner",
            Edge::Outer => "outer",
            Edge::Lower => "lower",
            Edge::Upper => "upper",
        })
    }
}

/// A pair of index ranges selecting part of the global `(x, y)` array.
///
/// Ranges are signed: guard bands of regions touching the domain edge lie
/// partly outside the array, and the caller decides whether that is an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionSlice {
    pub x: Range<isize>,
    pub y: Range<isize>,
}

impl RegionSlice {
    /// Converts to unsigned ranges if the slice lies inside an `nx × ny` array.
    pub fn within(&self, nx: usize, ny: usize) -> Option<(Range<usize>, Range<usize>)> {
        Some((to_range(&self.x, nx)?, to_range(&self.y, ny)?))
    }
}

fn to_range(r: &Range<isize>, len: usize) -> Option<Range<usize>> {
    let start = usize::try_from(r.start).ok()?;
    let end = usize::try_from(r.end).ok()?;
    (start <= end && end <= len).then_some(start..end)
}

/// Global bounds and neighbour names of one region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub x_inner: usize,
    pub x_outer: usize,
    pub y_lower: usize,
    pub y_upper: usize,
    pub connection_inner: Option<String>,
    pub connection_outer: Option<String>,
    pub connection_lower: Option<String>,
    pub connection_upper: Option<String>,
}

impl Region {
    /// A region with no neighbours.
    pub fn new(name: &str, x: Range<usize>, y: Range<usize>) -> Self {
        Self {
            name: name.to_string(),
            x_inner: x.start,
            x_outer: x.end,
            y_lower: y.start,
            y_upper: y.end,
            connection_inner: None,
            connection_outer: None,
            connection_lower: None,
            connection_upper: None,
        }
    }

    pub fn x_range(&self) -> Range<usize> {
        self.x_inner..self.x_outer
    }

    pub fn y_range(&self) -> Range<usize> {
        self.y_lower..self.y_upper
    }

    pub fn nx(&self) -> usize {
        self.x_outer.saturating_sub(self.x_inner)
    }

    pub fn ny(&self) -> usize {
        self.y_upper.saturating_sub(self.y_lower)
    }

    /// Number of cells covered, excluding guards.
    pub fn area(&self) -> usize {
        self.nx().saturating_mul(self.ny())
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Neighbour across `edge`, or `None` at a true boundary.
    pub fn connection(&self, edge: Edge) -> Option<&str> {
        match edge {
            Edge::Inner => self.connection_inner.as_deref(),
            Edge::Outer => self.connection_outer.as_deref(),
            Edge::Lower => self.connection_lower.as_deref(),
            Edge::Upper => self.connection_upper.as_deref(),
        }
    }

    pub(crate) fn set_connection(&mut self, edge: Edge, target: &str) {
        let slot = match edge {
            Edge::Inner => &mut self.connection_inner,
            Edge::Outer => &mut self.connection_outer,
            Edge::Lower => &mut self.connection_lower,
            Edge::Upper => &mut self.connection_upper,
        };
        *slot = Some(target.to_string());
    }

    /// Iterate `(edge, neighbour)` over connected edges.
    pub fn connections(&self) -> impl Iterator<Item = (Edge, &str)> + '_ {
        Edge::ALL
            .into_iter()
            .filter_map(move |e| self.connection(e).map(|n| (e, n)))
    }

    fn signed(&self) -> (isize, isize, isize, isize) {
        (
            self.x_inner as isize,
            self.x_outer as isize,
            self.y_lower as isize,
            self.y_upper as isize,
        )
    }

    /// Slice selecting this region, widened by `mxg`/`myg` on each edge
    /// that has a neighbour. Edges at true boundaries are never widened.
    pub fn slices(&self, mxg: usize, myg: usize) -> RegionSlice {
        let (mut xi, mut xo, mut yl, mut yu) = self.signed();
        let (mxg, myg) = (mxg as isize, myg as isize);
        if self.connection_inner.is_some() {
            xi -= mxg;
        }
        if self.connection_outer.is_some() {
            xo += mxg;
        }
        if self.connection_lower.is_some() {
            yl -= myg;
        }
        if self.connection_upper.is_some() {
            yu += myg;
        }
        RegionSlice { x: xi..xo, y: yl..yu }
    }

    /// `mxg` cells just outside the region on the inner-x side.
    pub fn inner_guards(&self, mxg: usize) -> RegionSlice {
        let (xi, _, yl, yu) = self.signed();
        RegionSlice {
            x: xi - mxg as isize..xi,
            y: yl..yu,
        }
    }

    /// `mxg` cells just outside-x of the region.
    pub fn outer_guards(&self, mxg: usize) -> RegionSlice {
        let (_, xo, yl, yu) = self.signed();
        RegionSlice {
            x: xo..xo + mxg as isize,
            y: yl..yu,
        }
    }

    /// `myg` cells just below the region in y.
    pub fn lower_guards(&self, myg: usize) -> RegionSlice {
        let (xi, xo, yl, _) = self.signed();
        RegionSlice {
            x: xi..xo,
            y: yl - myg as isize..yl,
        }
    }

    /// `myg` cells just above the region in y.
    pub fn upper_guards(&self, myg: usize) -> RegionSlice {
        let (xi, xo, _, yu) = self.signed();
        RegionSlice {
            x: xi..xo,
            y: yu..yu + myg as isize,
        }
    }

    /// Guard band outside `edge` with the given width.
    pub fn guards(&self, edge: Edge, width: usize) -> RegionSlice {
        match edge {
            Edge::Inner => self.inner_guards(width),
            Edge::Outer => self.outer_guards(width),
            Edge::Lower => self.lower_guards(width),
            Edge::Upper => self.upper_guards(width),
        }
    }

    /// The `width` cells just inside the region along `edge`: what a
    /// neighbour across that edge receives as its guard cells.
    pub fn edge_band(&self, edge: Edge, width: usize) -> RegionSlice {
        let (xi, xo, yl, yu) = self.signed();
        let w = width as isize;
        match edge {
            Edge::Inner => RegionSlice { x: xi..xi + w, y: yl..yu },
            Edge::Outer => RegionSlice { x: xo - w..xo, y: yl..yu },
            Edge::Lower => RegionSlice { x: xi..xo, y: yl..yl + w },
            Edge::Upper => RegionSlice { x: xi..xo, y: yu - w..yu },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked() -> Region {
        let mut r = Region::new("core", 2..6, 4..10);
        r.set_connection(Edge::Outer, "SOL");
        r.set_connection(Edge::Lower, "core");
        r.set_connection(Edge::Upper, "core");
        r
    }

    #[test]
    fn slices_widen_only_at_connected_edges() {
        let s = linked().slices(2, 1);
        assert_eq!(s.x, 2..8);
        assert_eq!(s.y, 3..11);
        let bare = Region::new("sol", 0..4, 0..8).slices(2, 2);
        assert_eq!((bare.x, bare.y), (0..4, 0..8));
    }

    #[test]
    fn guard_bands_sit_outside_bounds() {
        let r = linked();
        assert_eq!(r.inner_guards(2), RegionSlice { x: 0..2, y: 4..10 });
        assert_eq!(r.outer_guards(2), RegionSlice { x: 6..8, y: 4..10 });
        assert_eq!(r.lower_guards(1), RegionSlice { x: 2..6, y: 3..4 });
        assert_eq!(r.upper_guards(1), RegionSlice { x: 2..6, y: 10..11 });
    }

    #[test]
    fn edge_band_sits_inside_bounds() {
        let r = linked();
        assert_eq!(r.edge_band(Edge::Upper, 2), RegionSlice { x: 2..6, y: 8..10 });
        assert_eq!(r.edge_band(Edge::Inner, 1), RegionSlice { x: 2..3, y: 4..10 });
    }

    #[test]
    fn negative_guard_band_is_outside_array() {
        let r = Region::new("pfr", 0..3, 0..5);
        assert_eq!(r.inner_guards(2).within(10, 10), None);
        assert_eq!(r.outer_guards(2).within(10, 10), Some((3..5, 0..5)));
    }

    #[test]
    fn connections_iterate_in_edge_order() {
        let r = linked();
        let got: Vec<_> = r.connections().collect();
        assert_eq!(
            got,
            vec![(Edge::Outer, "SOL"), (Edge::Lower, "core"), (Edge::Upper, "core")]
        );
    }
}
