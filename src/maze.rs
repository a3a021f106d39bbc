use rand::Rng;
use std::fmt;

use crate::cells::{CellState, Coordinate};
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::renderers::{self, DisplayGrid};
use crate::units::{Height, Width};

/// A perfect maze, generated once on construction and read only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    seed: Option<u64>,
}

impl Maze {
    /// Carve a `width` x `height` maze starting from `(0, 0)`.
    ///
    /// A given seed always produces the same maze, no seed draws one from the operating
    /// system. Zero dimensions fail with `InvalidDimensions` before anything is allocated.
    pub fn new(width: Width, height: Height, seed: Option<u64>) -> Result<Maze> {
        let grid = generators::generate(width, height, seed)?;
        Ok(Maze { grid, seed })
    }

    /// Carve a maze using a caller supplied random source.
    pub fn with_rng<R: Rng>(width: Width, height: Height, rng: &mut R) -> Result<Maze> {
        let grid = generators::generate_with_rng(width, height, rng)?;
        Ok(Maze { grid, seed: None })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.grid.height()
    }

    /// The seed the maze was generated from, if it was seeded explicitly.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Wall and visited state of the cell at `(x, y)`.
    ///
    /// Panics if the coordinate is outside of the maze.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> CellState {
        self.grid.get(x, y)
    }

    pub fn try_cell(&self, coord: Coordinate) -> Result<CellState> {
        self.grid.try_get(coord)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn display_grid(&self) -> DisplayGrid {
        renderers::display_grid(&self.grid)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
