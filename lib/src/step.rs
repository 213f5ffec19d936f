//! The transition from one generation to the next.

use crate::{
    grid::Grid,
    neighbors::{count_unchecked, BoundaryPolicy},
};

/// The rule `B3/S23`.
///
/// Returns the next state of a cell with the given state
/// and number of living neighbors.
#[inline]
pub fn transition(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,
        (true, _) => false,
        (false, 3) => true,
        (false, _) => false,
    }
}

/// Writes the successor of `src` into `dst`.
///
/// Every cell of `dst` is computed from `src` only, and `dst` is never read.
/// Both grids must have the same dimensions.
pub(crate) fn step_into(src: &Grid, dst: &mut Grid, policy: BoundaryPolicy) {
    debug_assert_eq!(src.dims(), dst.dims());
    let (width, height) = src.dims();
    for y in 0..height {
        for x in 0..width {
            let index = src.index((x, y));
            let neighbors = count_unchecked(src, (x, y), policy);
            dst.set_bit(index, transition(src.bit(index), neighbors));
        }
    }
}

/// The next generation of `grid`, in a new grid of the same dimensions.
pub fn next_generation(grid: &Grid, policy: BoundaryPolicy) -> Grid {
    let mut next = grid.clone();
    step_into(grid, &mut next, policy);
    next
}
