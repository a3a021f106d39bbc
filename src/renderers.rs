use error_chain::bail;
use image::{GrayImage, Luma};
use log::debug;
use std::convert::TryFrom;
use std::fmt;
use std::path::Path;

use crate::cells::Wall;
use crate::errors::*;
use crate::grid::Grid;

/// The maze upscaled to a 0/1 tile map twice the width and height of the cell grid.
///
/// Every cell `(x, y)` owns the 2x2 block of tiles starting at `(2x, 2y)`:
///
/// - `(2x, 2y)` is always 1
/// - `(2x + 1, 2y)` is 1 while the cell's top wall stands
/// - `(2x, 2y + 1)` is 0 while the cell's left wall stands, otherwise 1
/// - `(2x + 1, 2y + 1)` is always 0
///
/// Only the top and left walls are sampled, the right and bottom walls of a cell show up
/// through the left and top walls of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayGrid {
    tiles: Vec<u8>,
    width: usize,
    height: usize,
}

/// Build the display grid for the current state of `grid`.
pub fn display_grid(grid: &Grid) -> DisplayGrid {
    let width = grid.width().0 * 2;
    let height = grid.height().0 * 2;
    let mut tiles = vec![0; width * height];

    for coord in grid.iter() {
        let state = grid[coord];
        let (x, y) = (coord.x as usize * 2, coord.y as usize * 2);
        let top_row = y * width;
        let bottom_row = (y + 1) * width;

        tiles[top_row + x] = 1;
        tiles[top_row + x + 1] = if state.has_wall(Wall::Top) { 1 } else { 0 };
        tiles[bottom_row + x] = if state.has_wall(Wall::Left) { 0 } else { 1 };
        tiles[bottom_row + x + 1] = 0;
    }

    DisplayGrid {
        tiles,
        width,
        height,
    }
}

impl DisplayGrid {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile value at `(x, y)`.
    ///
    /// Panics if the position is outside of the display grid.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height,
                "tile ({}, {}) is outside of the {}x{} display grid", x, y, self.width, self.height);
        self.tiles[y * self.width + x]
    }

    /// The tiles as `width` columns of `height` values each, i.e. indexed `[x][y]`.
    pub fn columns(&self) -> Vec<Vec<u8>> {
        (0..self.width)
            .map(|x| (0..self.height).map(|y| self.tiles[y * self.width + x]).collect())
            .collect()
    }

    /// The tiles as `height` rows of `width` values each, i.e. indexed `[y][x]`.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.tiles.chunks(self.width).map(|row| row.to_vec()).collect()
    }

    /// Draw every tile as a `cell_pixels` sized square: black for 1 and white for 0.
    ///
    /// Fails with `ImageTooLarge` if the image side lengths do not fit in `u32` or its
    /// pixel count does not fit in `usize`.
    pub fn to_image(&self, cell_pixels: u32) -> Result<GrayImage> {
        let side = cell_pixels.max(1);
        let to_pixels = |tiles: usize| u32::try_from(tiles).ok().and_then(|t| t.checked_mul(side));

        let (img_width, img_height) = match (to_pixels(self.width), to_pixels(self.height)) {
            (Some(w), Some(h)) if (w as usize).checked_mul(h as usize).is_some() => (w, h),
            _ => bail!(ErrorKind::ImageTooLarge(self.width, self.height, side)),
        };

        Ok(GrayImage::from_fn(img_width, img_height, |px, py| {
            let tile = self.tiles[(py / side) as usize * self.width + (px / side) as usize];
            if tile == 1 { Luma([0u8]) } else { Luma([0xffu8]) }
        }))
    }

    /// Write the image rendering to `path`, the format is chosen from the file extension.
    pub fn save_image<P: AsRef<Path>>(&self, path: P, cell_pixels: u32) -> Result<()> {
        let path = path.as_ref();
        debug!("saving {}x{} display grid to {}", self.width, self.height, path.display());
        self.to_image(cell_pixels)?.save(path)?;
        Ok(())
    }
}

impl fmt::Display for DisplayGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.chunks(self.width) {
            let line: String = row.iter().map(|&tile| if tile == 1 { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use quickcheck::quickcheck;

    use crate::cells::Coordinate;
    use crate::generators;
    use crate::units::{Height, Width};

    fn walled_grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).unwrap()
    }

    #[test]
    fn single_cell_display() {
        let d = display_grid(&walled_grid(1, 1));
        assert_eq!((d.width(), d.height()), (2, 2));
        assert_eq!(d.get(0, 0), 1);
        assert_eq!(d.get(1, 0), 1);
        assert_eq!(d.get(0, 1), 0);
        assert_eq!(d.get(1, 1), 0);
        assert_eq!(d.columns(), vec![vec![1, 0], vec![1, 0]]);
        assert_eq!(d.rows(), vec![vec![1, 1], vec![0, 0]]);
    }

    #[test]
    fn only_top_and_left_walls_are_sampled() {
        let mut g = walled_grid(2, 2);
        // open the passage between (0,0) and (1,0): clears (0,0) Right and (1,0) Left
        g.remove_wall(Coordinate::new(0, 0), Wall::Right);
        // open the passage between (1,0) and (1,1): clears (1,0) Bottom and (1,1) Top
        g.remove_wall(Coordinate::new(1, 0), Wall::Bottom);
        let d = display_grid(&g);

        assert_eq!(d.rows(),
                   vec![vec![1, 1, 1, 1],
                        vec![0, 0, 1, 0],
                        vec![1, 1, 1, 0],
                        vec![0, 0, 0, 0]]);
    }

    #[test]
    fn corners_are_fixed() {
        let g = generators::generate(Width(6), Height(5), Some(8)).unwrap();
        let d = display_grid(&g);
        for coord in g.iter() {
            let (x, y) = (coord.x as usize * 2, coord.y as usize * 2);
            assert_eq!(d.get(x, y), 1);
            assert_eq!(d.get(x + 1, y + 1), 0);
        }
    }

    #[test]
    fn display_is_twice_the_grid_size() {
        for &(w, h) in &[(1, 1), (1, 7), (4, 3), (10, 10)] {
            let g = generators::generate(Width(w), Height(h), Some(3)).unwrap();
            let d = display_grid(&g);
            assert_eq!(d.width(), 2 * w);
            assert_eq!(d.height(), 2 * h);
            assert_eq!(d.columns().len(), 2 * w);
            assert!(d.columns().iter().all(|column| column.len() == 2 * h));
            assert!(d.rows().iter().flat_map(|row| row.iter()).all(|&t| t == 0 || t == 1));
        }
    }

    #[test]
    fn rendering_is_repeatable() {
        let g = generators::generate(Width(8), Height(8), Some(21)).unwrap();
        assert_eq!(display_grid(&g), display_grid(&g));
    }

    #[test]
    #[should_panic]
    fn tile_out_of_range_panics() {
        let d = display_grid(&walled_grid(1, 1));
        let _ = d.get(2, 0);
    }

    #[test]
    fn text_rendering() {
        let d = display_grid(&walled_grid(2, 1));
        assert_eq!(format!("{}", d), "####\n....\n");
    }

    #[test]
    fn image_rendering() {
        let d = display_grid(&walled_grid(1, 1));
        let img = d.to_image(3).unwrap();
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(0, 0), &Luma([0u8]));
        assert_eq!(img.get_pixel(5, 2), &Luma([0u8]));
        assert_eq!(img.get_pixel(2, 3), &Luma([0xffu8]));
        assert_eq!(img.get_pixel(5, 5), &Luma([0xffu8]));
    }

    #[test]
    fn oversized_image_is_an_error() {
        let d = display_grid(&walled_grid(2, 1));
        for &cell_pixels in &[1_200_000_000, u32::MAX] {
            match d.to_image(cell_pixels) {
                Err(Error(ErrorKind::ImageTooLarge(4, 2, side), _)) => assert_eq!(side, cell_pixels),
                Err(e) => panic!("expected image too large error, got {}", e),
                Ok(img) => panic!("expected image too large error, got {:?}", img.dimensions()),
            }
        }
        assert!(d.save_image("never_written.png", u32::MAX).is_err());
    }

    #[test]
    fn zero_cell_pixels_draws_one_pixel_per_tile() {
        let d = display_grid(&walled_grid(3, 2));
        assert_eq!(d.to_image(0).unwrap().dimensions(), (6, 4));
    }

    #[test]
    fn display_tiles_follow_top_and_left_walls_property() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            let g = generators::generate(Width(w), Height(h), Some(seed)).unwrap();
            let d = display_grid(&g);
            if d.width() != 2 * w || d.height() != 2 * h {
                return false;
            }
            g.iter().all(|coord| {
                let state = g[coord];
                let (x, y) = (coord.x as usize * 2, coord.y as usize * 2);
                d.get(x, y) == 1 &&
                (d.get(x + 1, y) == 1) == state.has_wall(Wall::Top) &&
                (d.get(x, y + 1) == 1) == !state.has_wall(Wall::Left) &&
                d.get(x + 1, y + 1) == 0
            })
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }
}
