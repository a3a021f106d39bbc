use error_chain::bail;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

use crate::cells::{CellFlag, CellState, Coordinate, Wall};
use crate::errors::*;
use crate::units::{EdgesCount, Height, NodesCount, Width};

/// In-bounds neighbours of a cell, each paired with the wall separating it from that cell.
pub type NeighbourSmallVec = SmallVec<[(Coordinate, Wall); 4]>;

/// Rectangular buffer of cell states addressed by `(x, y)`, stored row major.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {}, height: {}, passages: {}",
               self.width, self.height, self.passage_count())
    }
}

impl Grid {
    /// A grid with every wall of every cell standing and no cell visited.
    ///
    /// Fails with `InvalidDimensions` before allocating if either dimension is zero
    /// or too large to address with `u32` coordinates.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        let max_dimension = u32::MAX as usize;
        if w == 0 || h == 0 || w > max_dimension || h > max_dimension {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        let cells_count = w.checked_mul(h)
                           .ok_or_else(|| Error::from(ErrorKind::InvalidDimensions(w, h)))?;

        Ok(Grid {
            cells: vec![CellState::initial(); cells_count],
            width: w,
            height: h,
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(self.width)
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(self.height)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Node count and the number of interior edges that could hold a passage.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.width, self.height);
        let interior_edges = w * (h - 1) + h * (w - 1);
        (NodesCount(self.size()), EdgesCount(interior_edges))
    }

    /// Cell state at `(x, y)`.
    ///
    /// Panics if the coordinate is outside of the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> CellState {
        self[Coordinate::new(x, y)]
    }

    /// Overwrite the cell state at `(x, y)`.
    ///
    /// Panics if the coordinate is outside of the grid.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, state: CellState) {
        let index = self.checked_index(Coordinate::new(x, y));
        self.cells[index] = state;
    }

    /// Cell state at `coord`, or None if the coordinate is outside of the grid.
    #[inline]
    pub fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| self.cells[index])
    }

    pub fn try_get(&self, coord: Coordinate) -> Result<CellState> {
        self.cell(coord)
            .ok_or_else(|| ErrorKind::CoordinateOutOfRange(coord.x, coord.y).into())
    }

    pub fn try_set(&mut self, coord: Coordinate, state: CellState) -> Result<()> {
        let index = self.grid_coordinate_to_index(coord)
                        .ok_or_else(|| Error::from(ErrorKind::CoordinateOutOfRange(coord.x, coord.y)))?;
        self.cells[index] = state;
        Ok(())
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// The cell on the other side of `wall`, if that side is not the grid boundary.
    pub fn neighbour_at_wall(&self, coord: Coordinate, wall: Wall) -> Option<Coordinate> {
        let Coordinate { x, y } = coord;
        let neighbour = match wall {
            Wall::Left if x > 0 => Coordinate::new(x - 1, y),
            Wall::Top if y > 0 => Coordinate::new(x, y - 1),
            Wall::Right => Coordinate::new(x.checked_add(1)?, y),
            Wall::Bottom => Coordinate::new(x, y.checked_add(1)?),
            _ => return None,
        };
        if self.is_valid_coordinate(neighbour) {
            Some(neighbour)
        } else {
            None
        }
    }

    /// Cells to the Left, Top, Right and Bottom (in that order) of `coord` that lie
    /// within the grid, paired with the wall of `coord` that faces them.
    pub fn neighbours(&self, coord: Coordinate) -> NeighbourSmallVec {
        [Wall::Left, Wall::Top, Wall::Right, Wall::Bottom]
            .iter()
            .filter_map(|&wall| self.neighbour_at_wall(coord, wall).map(|n| (n, wall)))
            .collect()
    }

    /// Knock down `wall` of the cell at `coord` together with the matching wall of
    /// the neighbouring cell.
    ///
    /// Returns the neighbour that is now reachable, or None if `wall` is part of the
    /// grid boundary, in which case nothing changes.
    /// Panics if `coord` is outside of the grid.
    pub fn remove_wall(&mut self, coord: Coordinate, wall: Wall) -> Option<Coordinate> {
        let index = self.checked_index(coord);
        let neighbour = self.neighbour_at_wall(coord, wall)?;
        let neighbour_index = self.checked_index(neighbour);

        self.cells[index] = self.cells[index].without(wall);
        self.cells[neighbour_index] = self.cells[neighbour_index].without(wall.opposite());
        Some(neighbour)
    }

    /// Panics if `coord` is outside of the grid.
    pub fn mark_visited(&mut self, coord: Coordinate) {
        let index = self.checked_index(coord);
        self.cells[index] = self.cells[index].with(CellFlag::Visited);
    }

    #[inline]
    pub fn is_visited(&self, coord: Coordinate) -> bool {
        self.cell(coord).map_or(false, |state| state.is_visited())
    }

    /// Is there a passage through `wall` of the cell at `coord` into a neighbouring cell?
    pub fn is_open(&self, coord: Coordinate, wall: Wall) -> bool {
        self.neighbour_at_wall(coord, wall).is_some() &&
        self.cell(coord).map_or(false, |state| !state.has_wall(wall))
    }

    /// Every passage between two cells, each reported once as a (from, to) pair
    /// where `to` lies to the right of or below `from`.
    pub fn passages(&self) -> PassagesIter {
        PassagesIter {
            grid: self,
            cells: self.iter(),
            pending: None,
        }
    }

    pub fn passage_count(&self) -> usize {
        self.passages().count()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_width: self.width,
            cells_count: self.size(),
        }
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter {
            current_row: 0,
            row_width: self.width,
            rows_count: self.height,
        }
    }

    fn checked_index(&self, coord: Coordinate) -> usize {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => index,
            None => panic!("coordinate {} is outside of the {}x{} grid", coord, self.width, self.height),
        }
    }
}

impl Index<Coordinate> for Grid {
    type Output = CellState;

    fn index(&self, coord: Coordinate) -> &CellState {
        &self.cells[self.checked_index(coord)]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = Coordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_width: usize,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_grid_coordinate(self.row_width, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    row_width: usize,
    rows_count: usize,
}
impl Iterator for RowIter {
    type Item = Vec<Coordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows_count {
            let y = self.current_row as u32;
            let coords = (0..self.row_width)
                             .map(|x| Coordinate::new(x as u32, y))
                             .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows_count - self.current_row;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

pub struct PassagesIter<'a> {
    grid: &'a Grid,
    cells: CellIter,
    pending: Option<(Coordinate, Coordinate)>,
}
impl<'a> Iterator for PassagesIter<'a> {
    type Item = (Coordinate, Coordinate);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(passage) = self.pending.take() {
            return Some(passage);
        }
        let grid = self.grid;
        let through = |coord: Coordinate, wall: Wall| {
            if grid.is_open(coord, wall) {
                grid.neighbour_at_wall(coord, wall).map(|neighbour| (coord, neighbour))
            } else {
                None
            }
        };

        for coord in &mut self.cells {
            match (through(coord, Wall::Right), through(coord, Wall::Bottom)) {
                (Some(right), below) => {
                    self.pending = below;
                    return Some(right);
                }
                (None, Some(below)) => return Some(below),
                (None, None) => continue,
            }
        }
        None
    }
}

impl<'a> fmt::Debug for PassagesIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PassagesIter :: cells iter : {:?}", self.cells)
    }
}

fn index_to_grid_coordinate(row_width: usize, one_dimensional_index: usize) -> Coordinate {
    let y = one_dimensional_index / row_width;
    let x = one_dimensional_index - (y * row_width);
    Coordinate::new(x as u32, y as u32)
}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// Box drawing glyph for a wall junction given which of its four arms are present.
fn corner_glyph(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        let (columns_count, rows_count) = (self.width, self.height);
        let east_wall = |x: usize, y: usize| self.get(x as u32, y as u32).has_wall(Wall::Right);
        let south_wall = |x: usize, y: usize| self.get(x as u32, y as u32).has_wall(Wall::Bottom);

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for x in 0..columns_count {
            output.push_str(WALL_LR_3);
            let is_last_cell = x == columns_count - 1;
            if is_last_cell {
                output.push_str(WALL_LD);
            } else {
                output.push_str(corner_glyph(true, true, false, east_wall(x, 0)));
            }
        }
        output.push_str("\n");

        for y in 0..rows_count {
            let is_last_row = y == rows_count - 1;

            // Each cell uses the southern wall of the cell above it as its own northern wall,
            // so only the cell body, its eastern boundary and its southern boundary are drawn.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render =
                String::from(corner_glyph(false, south_wall(0, y), true, !is_last_row));

            for x in 0..columns_count {
                let is_last_column = x == columns_count - 1;

                row_middle_section_render.push_str("   ");
                row_middle_section_render.push_str(if east_wall(x, y) { WALL_UD } else { " " });

                row_bottom_section_render.push_str(if south_wall(x, y) { WALL_LR_3 } else { "   " });

                // The junction at the south east corner of this cell
                let up = east_wall(x, y);
                let left = south_wall(x, y);
                let right = !is_last_column && south_wall(x + 1, y);
                let down = !is_last_row && east_wall(x, y + 1);
                row_bottom_section_render.push_str(corner_glyph(left, right, up, down));
            }

            output.push_str(&row_middle_section_render);
            output.push_str("\n");
            output.push_str(&row_bottom_section_render);
            output.push_str("\n");
        }

        write!(f, "{}", output)
    }
}
