//! Reading and writing patterns in
//! [Plaintext](https://conwaylife.com/wiki/Plaintext) (`.cells`) format.
//!
//! ```plaintext
//! !Name: Glider
//! !
//! .O.
//! ..O
//! OOO
//! ```
//!
//! Lines starting with `!` are comments. Every other line, even an empty one,
//! is a row of cells, from top to bottom. `.` is a dead cell, and any other
//! character is a living cell, though `O` is what gets written.
//! Rows shorter than the longest one are padded with dead cells.

use crate::{error::Error, grid::Grid};
use educe::Educe;
use log::debug;
use std::{
    fmt::{self, Display, Formatter},
    io::{BufRead, BufReader, Read, Write},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The character for dead cells.
const DEAD_CHAR: u8 = b'.';
/// The character written for living cells.
const ALIVE_CHAR: u8 = b'O';
/// The prefix of comment lines.
const COMMENT_CHAR: u8 = b'!';

/// Line terminator used when writing.
///
/// Reading always accepts both.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LineEnding {
    /// `\n`.
    #[educe(Default)]
    Lf,
    /// `\r\n`.
    CrLf,
}

impl LineEnding {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::CrLf),
            _ => Err(String::from("invalid LineEnding")),
        }
    }
}

impl Display for LineEnding {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let s = match self {
            LineEnding::Lf => "lf",
            LineEnding::CrLf => "crlf",
        };
        write!(f, "{}", s)
    }
}

/// A grid together with the comment lines of its file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Comment lines, without the leading `!`.
    pub comments: Vec<String>,

    /// The cells.
    pub grid: Grid,
}

impl Pattern {
    /// A pattern without comments.
    pub fn new(grid: Grid) -> Self {
        Pattern {
            comments: Vec::new(),
            grid,
        }
    }

    /// Reads a pattern from a byte stream.
    ///
    /// Returns [`Error::EmptyPattern`] if the stream has no rows of cells,
    /// and [`Error::IoError`] if reading fails.
    pub fn read<R: Read>(reader: R) -> Result<Self, Error> {
        let mut comments = Vec::new();
        let mut rows = Vec::new();
        for line in BufReader::new(reader).split(b'\n') {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.first() == Some(&COMMENT_CHAR) {
                comments.push(String::from_utf8_lossy(&line[1..]).into_owned());
            } else {
                rows.push(line);
            }
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        if width == 0 {
            return Err(Error::EmptyPattern);
        }
        let (w, h) = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(Error::InvalidDimensions {
                    width: width as i64,
                    height: height as i64,
                })
            }
        };

        let mut grid = Grid::dead(w, h)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c != DEAD_CHAR {
                    let index = grid.index((x as i32, y as i32));
                    grid.set_bit(index, true);
                }
            }
        }
        debug!(
            "Read a {}x{} pattern with {} comment lines",
            w,
            h,
            comments.len()
        );
        Ok(Pattern { comments, grid })
    }

    /// The name given by a `!Name:` comment line, if any.
    pub fn name(&self) -> Option<&str> {
        self.comments
            .iter()
            .find_map(|c| c.strip_prefix("Name:"))
            .map(str::trim)
    }

    /// Sets the `!Name:` comment line, replacing an existing one.
    pub fn set_name<S: AsRef<str>>(mut self, name: S) -> Self {
        let line = format!("Name: {}", name.as_ref());
        match self.comments.iter_mut().find(|c| c.starts_with("Name:")) {
            Some(c) => *c = line,
            None => self.comments.insert(0, line),
        }
        self
    }

    /// Writes the comment lines followed by the cells.
    pub fn write<W: Write>(&self, mut writer: W, line_ending: LineEnding) -> Result<(), Error> {
        for comment in &self.comments {
            writer.write_all(&[COMMENT_CHAR])?;
            writer.write_all(comment.as_bytes())?;
            writer.write_all(line_ending.as_bytes())?;
        }
        encode_with(&self.grid, writer, line_ending)
    }
}

/// Reads a grid from a byte stream, ignoring the comments.
pub fn decode<R: Read>(reader: R) -> Result<Grid, Error> {
    Pattern::read(reader).map(|pattern| pattern.grid)
}

/// Writes a grid without comment lines, each row ended by `\n`.
pub fn encode<W: Write>(grid: &Grid, writer: W) -> Result<(), Error> {
    encode_with(grid, writer, LineEnding::Lf)
}

/// Writes a grid without comment lines, each row ended by `line_ending`.
pub fn encode_with<W: Write>(
    grid: &Grid,
    mut writer: W,
    line_ending: LineEnding,
) -> Result<(), Error> {
    let (width, height) = grid.dims();
    let mut row = Vec::with_capacity(width as usize + 2);
    for y in 0..height {
        row.clear();
        row.extend((0..width).map(|x| {
            if grid.bit(grid.index((x, y))) {
                ALIVE_CHAR
            } else {
                DEAD_CHAR
            }
        }));
        row.extend_from_slice(line_ending.as_bytes());
        writer.write_all(&row)?;
    }
    writer.flush()?;
    Ok(())
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s.as_bytes())
    }
}
