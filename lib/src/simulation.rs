//! The simulation.

use crate::{
    error::Error,
    grid::Grid,
    neighbors::{self, BoundaryPolicy},
    plaintext::{self, LineEnding, Pattern},
    step::step_into,
};
use log::{debug, info, trace};
use rand::Rng;
use std::io::{Read, Write};

/// The current grid, the generation counter, and the boundary policy.
///
/// Every change to the grid goes through this type. The generation
/// counter is reset to `0` whenever the grid is replaced or wiped.
///
/// Two simulations are equal when their grids, generations and policies
/// are; the scratch buffer is not compared.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// The current generation.
    grid: Grid,

    /// The buffer the next generation is written into.
    ///
    /// Always has the same dimensions as `grid`.
    /// Its content is meaningless between steps.
    scratch: Grid,

    /// Number of steps since the last reset.
    generation: u64,

    /// The boundary policy.
    policy: BoundaryPolicy,
}

impl Simulation {
    /// Creates a simulation on an all-dead grid.
    pub fn new(width: i32, height: i32, policy: BoundaryPolicy) -> Result<Self, Error> {
        Ok(Simulation::with_grid(Grid::dead(width, height)?, policy))
    }

    /// Creates a simulation starting from the given grid, at generation `0`.
    pub fn with_grid(grid: Grid, policy: BoundaryPolicy) -> Self {
        Simulation {
            scratch: grid.clone(),
            grid,
            generation: 0,
            policy,
        }
    }

    /// The current grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of generations since the last reset.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The boundary policy.
    #[inline]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// `(width, height)` of the grid.
    #[inline]
    pub fn dims(&self) -> (i32, i32) {
        self.grid.dims()
    }

    /// Number of living cells.
    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }

    /// Number of living neighbors of a cell under the current policy.
    pub fn neighbor_count(&self, x: i32, y: i32) -> Result<u8, Error> {
        neighbors::count(&self.grid, x, y, self.policy)
    }

    /// Advances one generation.
    pub fn step(&mut self) {
        step_into(&self.grid, &mut self.scratch, self.policy);
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
        trace!(
            "Generation {}: {} cells alive",
            self.generation,
            self.grid.alive_count()
        );
    }

    /// Advances `n` generations.
    pub fn step_by(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Flips a cell and returns its new state.
    ///
    /// The generation counter is kept.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<bool, Error> {
        self.grid.toggle(x, y)
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        debug!("Cleared the grid");
    }

    /// Sets every cell alive or dead at random,
    /// and resets the generation counter.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.randomize(rng);
        self.generation = 0;
        debug!("Randomized the grid: {} cells alive", self.alive_count());
    }

    /// Replaces the grid with an all-dead one of new dimensions,
    /// and resets the generation counter.
    ///
    /// Nothing changes if the dimensions are not positive.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), Error> {
        let grid = Grid::dead(width, height)?;
        self.replace_grid(grid);
        info!("Resized the grid to {}x{}", width, height);
        Ok(())
    }

    /// Sets the boundary policy. The grid and the generation counter are kept.
    pub fn set_policy(&mut self, policy: BoundaryPolicy) {
        if self.policy != policy {
            debug!("Boundary policy changed to {}", policy);
        }
        self.policy = policy;
    }

    /// Replaces the grid, taking its dimensions,
    /// and resets the generation counter.
    pub fn replace_grid(&mut self, grid: Grid) {
        self.scratch = grid.clone();
        self.grid.replace(grid);
        self.generation = 0;
    }

    /// Replaces the grid with a pattern read from a
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) stream.
    ///
    /// On failure the grid and the generation counter are left untouched.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<Pattern, Error> {
        let pattern = Pattern::read(reader)?;
        self.replace_grid(pattern.grid.clone());
        info!(
            "Loaded a {}x{} pattern{}",
            self.grid.width(),
            self.grid.height(),
            pattern
                .name()
                .map(|name| format!(" named {:?}", name))
                .unwrap_or_default()
        );
        Ok(pattern)
    }

    /// Writes the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext)
    /// format, without comment lines.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), Error> {
        self.save_with(writer, LineEnding::Lf)
    }

    /// Like [`save`](Self::save), with the given line terminator.
    pub fn save_with<W: Write>(&self, writer: W, line_ending: LineEnding) -> Result<(), Error> {
        plaintext::encode_with(&self.grid, writer, line_ending)?;
        info!(
            "Saved a {}x{} grid at generation {}",
            self.grid.width(),
            self.grid.height(),
            self.generation
        );
        Ok(())
    }
}

impl PartialEq for Simulation {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
            && self.generation == other.generation
            && self.policy == other.policy
    }
}

impl Eq for Simulation {}
