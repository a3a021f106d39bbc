//! **backtracker_mazes** generates perfect mazes on rectangular grids with the recursive
//! backtracker algorithm and renders them as text, 0/1 tile maps or images.

pub mod analysis;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod maze;
pub mod renderers;
pub mod units;

pub use crate::maze::Maze;
