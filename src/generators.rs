use error_chain::bail;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::cmp;
use std::iter::FromIterator;

use crate::cells::Coordinate;
use crate::errors::*;
use crate::grid::{Grid, NeighbourSmallVec};
use crate::units::{Height, Width};

/// A random source seeded from `seed`, or from the operating system's entropy when
/// no seed is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Produce a uniformly random permutation of `items` (Fisher-Yates).
///
/// Working from the last index down to the first, a uniform index `j` in `[0, i]` is drawn,
/// the element at `j` becomes the next output and is overwritten by the element at `i`.
pub fn shuffle<T, C, R>(items: &[T], rng: &mut R) -> C
    where T: Clone,
          C: FromIterator<T>,
          R: Rng
{
    let mut remaining: SmallVec<[T; 4]> = items.iter().cloned().collect();
    (0..remaining.len())
        .rev()
        .map(|i| {
            let swap_index = rng.gen_range(0, i + 1);
            let chosen = remaining[swap_index].clone();
            remaining[swap_index] = remaining[i].clone();
            chosen
        })
        .collect()
}

/// Generate a `width` x `height` perfect maze, carved from the top left cell.
///
/// The same seed and dimensions always give the same maze.
pub fn generate(width: Width, height: Height, seed: Option<u64>) -> Result<Grid> {
    let mut rng = seeded_rng(seed);
    generate_with_rng(width, height, &mut rng)
}

pub fn generate_with_rng<R>(width: Width, height: Height, rng: &mut R) -> Result<Grid>
    where R: Rng
{
    let mut grid = Grid::new(width, height)?;
    recursive_backtracker(&mut grid, Coordinate::new(0, 0), rng)?;
    Ok(grid)
}

// One cell on the current depth first path together with its neighbours in the order
// they are to be tried.
struct Frame {
    cell: Coordinate,
    candidates: NeighbourSmallVec,
    next: usize,
}

impl Frame {
    fn enter<R: Rng>(grid: &mut Grid, cell: Coordinate, rng: &mut R) -> Frame {
        grid.mark_visited(cell);
        Frame {
            cell,
            candidates: shuffle(&grid.neighbours(cell), rng),
            next: 0,
        }
    }
}

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid.
///
/// Starting at `start`, a random depth first walk knocks down the wall into each
/// unvisited neighbour before moving into it. The neighbours of a cell are shuffled once,
/// when the cell is entered. When a cell runs out of unvisited neighbours the walk
/// backtracks along its path. Every cell ends up visited and the remaining passages form a
/// spanning tree of the grid.
///
/// Returns the number of passages carved.
pub fn recursive_backtracker<R>(grid: &mut Grid, start: Coordinate, rng: &mut R) -> Result<usize>
    where R: Rng
{
    let mut walk = BacktrackerWalk::new(grid, start, rng)?;

    let mut carved = 0;
    while let Some((cell, neighbour)) = walk.carve_next() {
        carved += 1;
        trace!("carved passage {} - {}", cell, neighbour);
    }

    debug!("carved {} passages, max path depth {}", carved, walk.max_depth());
    Ok(carved)
}

/// A recursive backtracker walk over a grid, advanced one carved passage at a time.
///
/// The path is kept on an explicit stack rather than the call stack, so large grids cannot
/// overflow it.
pub struct BacktrackerWalk<'a, R: Rng> {
    grid: &'a mut Grid,
    rng: &'a mut R,
    stack: Vec<Frame>,
    max_depth: usize,
}

impl<'a, R: Rng> BacktrackerWalk<'a, R> {
    /// Begin a walk at `start`, which is marked visited straight away.
    pub fn new(grid: &'a mut Grid, start: Coordinate, rng: &'a mut R) -> Result<BacktrackerWalk<'a, R>> {
        if !grid.is_valid_coordinate(start) {
            bail!(ErrorKind::CoordinateOutOfRange(start.x, start.y));
        }
        debug!("recursive backtracker on {:?} from {}", grid, start);

        let first = Frame::enter(grid, start, rng);
        Ok(BacktrackerWalk {
            grid,
            rng,
            stack: vec![first],
            max_depth: 1,
        })
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Longest path held on the stack so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Knock down the next wall, backtracking as far as needed to find a cell on the path
    /// with an unvisited neighbour. Returns the cell and the neighbour now joined to it,
    /// or `None` once the walk has finished.
    pub fn carve_next(&mut self) -> Option<(Coordinate, Coordinate)> {
        while let Some(frame) = self.stack.last_mut() {
            if frame.next == frame.candidates.len() {
                self.stack.pop();
                continue;
            }
            let (neighbour, wall) = frame.candidates[frame.next];
            frame.next += 1;
            let cell = frame.cell;

            if self.grid.is_visited(neighbour) {
                continue;
            }
            self.grid.remove_wall(cell, wall)?;
            self.stack.push(Frame::enter(&mut *self.grid, neighbour, &mut *self.rng));
            self.max_depth = cmp::max(self.max_depth, self.stack.len());
            return Some((cell, neighbour));
        }
        None
    }
}
