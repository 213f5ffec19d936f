//! Conway's Game of Life on a finite grid.
//!
//! The edges of the grid are either dead ([`BoundaryPolicy::Bounded`])
//! or glued to the opposite edges ([`BoundaryPolicy::Toroidal`]).
//! Patterns are read and written in
//! [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
//!
//! # Example
//!
//! ```rust
//! use rlifesim_lib::{BoundaryPolicy, Simulation};
//!
//! let mut sim = Simulation::new(5, 5, BoundaryPolicy::Bounded).unwrap();
//! sim.load(&b"!Name: Blinker\n.....\n.....\n.OOO.\n.....\n.....\n"[..])
//!     .unwrap();
//! sim.step();
//!
//! let mut out = Vec::new();
//! sim.save(&mut out).unwrap();
//! assert_eq!(out, b".....\n..O..\n..O..\n..O..\n.....\n");
//! ```

mod config;
mod error;
mod grid;
pub mod neighbors;
pub mod plaintext;
mod simulation;
mod step;

pub use config::Config;
pub use error::Error;
pub use grid::{Coord, Grid};
pub use neighbors::BoundaryPolicy;
pub use plaintext::{LineEnding, Pattern};
pub use simulation::Simulation;
pub use step::{next_generation, transition};
