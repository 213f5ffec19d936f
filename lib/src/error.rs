//! All kinds of errors in this crate.

use crate::grid::Coord;
use displaydoc::Display;
use std::io;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Width and height should be positive, got {width}x{height}.
    InvalidDimensions { width: i64, height: i64 },
    /// Cell at {0:?} is outside the grid.
    OutOfBounds(Coord),
    /// The pattern contains no cells.
    EmptyPattern,
    /// I/O error: {0}.
    IoError(#[from] io::Error),
}

