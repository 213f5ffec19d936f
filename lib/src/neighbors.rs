//! Counting living neighbors under a boundary policy.

use crate::{
    error::Error,
    grid::{Coord, Grid},
};
use educe::Educe;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The eight offsets of the Moore neighborhood.
const NBHD: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// What lies beyond the edges of the grid.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundaryPolicy {
    /// Cells outside the grid are permanently dead.
    #[educe(Default)]
    Bounded,

    /// The grid wraps around at both axes,
    /// each edge glued to the opposite one.
    Toroidal,
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounded" | "b" => Ok(BoundaryPolicy::Bounded),
            "toroidal" | "torus" | "t" => Ok(BoundaryPolicy::Toroidal),
            _ => Err(String::from("invalid BoundaryPolicy")),
        }
    }
}

impl Display for BoundaryPolicy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let s = match self {
            BoundaryPolicy::Bounded => "bounded",
            BoundaryPolicy::Toroidal => "toroidal",
        };
        write!(f, "{}", s)
    }
}

impl BoundaryPolicy {
    /// The other policy.
    pub fn toggled(self) -> Self {
        match self {
            BoundaryPolicy::Bounded => BoundaryPolicy::Toroidal,
            BoundaryPolicy::Toroidal => BoundaryPolicy::Bounded,
        }
    }

    /// Where the neighbor of `coord` at `offset` actually lies.
    ///
    /// Returns `None` when it falls outside a bounded grid.
    #[inline]
    fn resolve(
        self,
        (width, height): (i32, i32),
        (x, y): Coord,
        (dx, dy): (i32, i32),
    ) -> Option<Coord> {
        let (nx, ny) = (x + dx, y + dy);
        match self {
            BoundaryPolicy::Bounded => {
                if (0..width).contains(&nx) && (0..height).contains(&ny) {
                    Some((nx, ny))
                } else {
                    None
                }
            }
            BoundaryPolicy::Toroidal => Some((nx.rem_euclid(width), ny.rem_euclid(height))),
        }
    }
}

/// Counts the living neighbors of a cell known to be inside the grid.
///
/// An offset that wraps back onto the cell itself is skipped,
/// so on narrow toroidal grids the cell never counts itself.
pub(crate) fn count_unchecked(grid: &Grid, coord: Coord, policy: BoundaryPolicy) -> u8 {
    let dims = grid.dims();
    NBHD.iter()
        .filter_map(|&offset| policy.resolve(dims, coord, offset))
        .filter(|&neighbor| neighbor != coord && grid.bit(grid.index(neighbor)))
        .count() as u8
}

/// Number of living cells among the eight neighbors of `(x, y)`.
///
/// The result is always in `0..=8`.
/// Returns [`Error::OutOfBounds`] if `(x, y)` is outside the grid.
pub fn count(grid: &Grid, x: i32, y: i32, policy: BoundaryPolicy) -> Result<u8, Error> {
    if grid.contains((x, y)) {
        Ok(count_unchecked(grid, (x, y), policy))
    } else {
        Err(Error::OutOfBounds((x, y)))
    }
}

/// Neighbor counts of every cell, in row-major order.
pub fn neighbor_counts(grid: &Grid, policy: BoundaryPolicy) -> Vec<u8> {
    let (width, height) = grid.dims();
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|coord| count_unchecked(grid, coord, policy))
        .collect()
}
