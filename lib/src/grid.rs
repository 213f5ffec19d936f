//! The grid of cells.

use crate::error::Error;
use rand::Rng;
use std::{
    fmt::{self, Debug, Display, Formatter},
    mem,
};

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`.
/// Both coordinates are 0-indexed, `x` grows to the right and `y` downwards.
pub type Coord = (i32, i32);

/// Number of cells packed into one word.
const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-size rectangle of cells.
///
/// The cells are stored in a dense bitset in row-major order.
/// A set bit means a living cell.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Width.
    width: i32,

    /// Height.
    height: i32,

    /// The bitset.
    ///
    /// Its length is always `ceil(width * height / 64)`, and the bits
    /// after the last cell are always zero, so that two equal grids
    /// have equal words.
    words: Box<[u64]>,
}

impl Grid {
    /// Creates a new grid with every cell set to `fill`.
    ///
    /// Returns [`Error::InvalidDimensions`] if the width or the height
    /// is not positive, or if the grid is too large to allocate.
    pub fn new(width: i32, height: i32, fill: bool) -> Result<Self, Error> {
        let invalid = || Error::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        };
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }
        let area = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(invalid)?;
        let len = (area + WORD_BITS - 1) / WORD_BITS;
        let mut words = Vec::new();
        words.try_reserve_exact(len).map_err(|_| invalid())?;
        words.resize(len, 0);
        let mut grid = Grid {
            width,
            height,
            words: words.into_boxed_slice(),
        };
        if fill {
            grid.fill(true);
        }
        Ok(grid)
    }

    /// Creates a new grid where all cells are dead.
    pub fn dead(width: i32, height: i32) -> Result<Self, Error> {
        Grid::new(width, height, false)
    }

    /// Creates a new grid where exactly the given cells are alive.
    pub fn with_alive_cells<I>(width: i32, height: i32, cells: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut grid = Grid::dead(width, height)?;
        for (x, y) in cells {
            grid.set(x, y, true)?;
        }
        Ok(grid)
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dims(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the coordinates lie inside the grid.
    #[inline]
    pub fn contains(&self, (x, y): Coord) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Position of a cell in the bitset. The cell must be inside the grid.
    #[inline]
    pub(crate) fn index(&self, (x, y): Coord) -> usize {
        debug_assert!(self.contains((x, y)));
        y as usize * self.width as usize + x as usize
    }

    fn checked_index(&self, coord: Coord) -> Result<usize, Error> {
        if self.contains(coord) {
            Ok(self.index(coord))
        } else {
            Err(Error::OutOfBounds(coord))
        }
    }

    #[inline]
    pub(crate) fn bit(&self, index: usize) -> bool {
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    #[inline]
    pub(crate) fn set_bit(&mut self, index: usize, alive: bool) {
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if alive {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Whether the cell at `(x, y)` is alive.
    pub fn get(&self, x: i32, y: i32) -> Result<bool, Error> {
        let index = self.checked_index((x, y))?;
        Ok(self.bit(index))
    }

    /// Sets the state of the cell at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, alive: bool) -> Result<(), Error> {
        let index = self.checked_index((x, y))?;
        self.set_bit(index, alive);
        Ok(())
    }

    /// Flips the state of the cell at `(x, y)`, and returns the new state.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<bool, Error> {
        let index = self.checked_index((x, y))?;
        self.words[index / WORD_BITS] ^= 1u64 << (index % WORD_BITS);
        Ok(self.bit(index))
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Sets every cell to the same state.
    pub fn fill(&mut self, alive: bool) {
        let word = if alive { !0 } else { 0 };
        self.words.iter_mut().for_each(|w| *w = word);
        self.mask_tail();
    }

    /// Sets every cell independently to alive or dead with probability `1/2`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.iter_mut().for_each(|w| *w = rng.gen());
        self.mask_tail();
    }

    /// Clears the unused bits of the last word.
    fn mask_tail(&mut self) {
        let used = self.area() % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    /// Number of living cells.
    pub fn alive_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Coordinates of all living cells, row by row from the top.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&coord| self.bit(self.index(coord)))
    }

    /// Replaces the whole grid, returning the old one.
    pub fn replace(&mut self, other: Grid) -> Grid {
        mem::replace(self, other)
    }
}

/// Displays the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext)
/// format, without comment lines.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `O`.
impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = if self.bit(self.index((x, y))) { 'O' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.width, self.height)?;
        Display::fmt(self, f)
    }
}
