//! Simulation configuration.

use crate::{error::Error, neighbors::BoundaryPolicy, simulation::Simulation};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Simulation configuration.
///
/// The simulation is created from the size and the policy.
/// The other fields are read by whatever drives the simulation.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Width.
    #[educe(Default = 64)]
    pub width: i32,

    /// Height.
    #[educe(Default = 64)]
    pub height: i32,

    /// What lies beyond the edges of the grid.
    pub policy: BoundaryPolicy,

    /// Milliseconds between two generations when running.
    #[educe(Default = 100)]
    pub generation_length: u64,

    /// Seed for randomizing the grid.
    ///
    /// `None` means that a seed is taken from the operating system.
    pub seed: Option<u64>,

    /// Whether to draw the lines between cells.
    #[educe(Default = true)]
    pub draw_grid: bool,

    /// Whether to show the number of living neighbors of each cell.
    pub show_neighbors: bool,

    /// Whether to show the number of living cells.
    #[educe(Default = true)]
    pub show_cells_alive: bool,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: i32, height: i32) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the boundary policy.
    pub fn set_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the time between two generations, in milliseconds.
    pub fn set_generation_length(mut self, generation_length: u64) -> Self {
        self.generation_length = generation_length;
        self
    }

    /// Sets the seed.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// Sets whether to draw the lines between cells.
    pub fn set_draw_grid(mut self, draw_grid: bool) -> Self {
        self.draw_grid = draw_grid;
        self
    }

    /// Sets whether to show neighbor counts.
    pub fn set_show_neighbors(mut self, show_neighbors: bool) -> Self {
        self.show_neighbors = show_neighbors;
        self
    }

    /// Sets whether to show the number of living cells.
    pub fn set_show_cells_alive(mut self, show_cells_alive: bool) -> Self {
        self.show_cells_alive = show_cells_alive;
        self
    }

    /// Creates a new simulation on an all-dead grid.
    /// Returns an error if the width or the height is not positive.
    pub fn simulation(&self) -> Result<Simulation, Error> {
        Simulation::new(self.width, self.height, self.policy)
    }
}
