use backtracker_mazes::{
    analysis::MazeReport,
    units::{Height, Width},
    Maze,
};
use docopt::Docopt;
use error_chain::bail;
use log::info;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [text | display] [(--grid-size=<n>|[--width=<w> --height=<h>])] [--seed=<s>] [--save-display=<path>] [--save-edges=<path>] [--verify]
    mazes_driver image --image-out=<path> [--cell-pixels=<n>] [(--grid-size=<n>|[--width=<w> --height=<h>])] [--seed=<s>] [--save-display=<path>] [--save-edges=<path>] [--verify]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --width=<w>            The grid width in a w*h grid [default: 20].
    --height=<h>           The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed for the random source. The same seed always gives the same maze.
    --image-out=<path>     Output file path for an image rendering of the maze display grid. Always PNG format.
    --cell-pixels=<n>      Pixel count of one display grid tile in an image [default: 10].
    --save-display=<path>  Write the 0/1 display grid to a text file, one row per line.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --verify               Check that the maze is a spanning tree of the grid and report on it.

Commands:
    text                   Print the maze with box drawing characters (the default).
    display                Print the display grid, '#' for 1 and '.' for 0.
    image                  Render the display grid to a PNG file.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    cmd_text: bool,
    cmd_display: bool,
    cmd_image: bool,
    flag_image_out: String,
    flag_cell_pixels: u32,
    flag_save_display: String,
    flag_save_edges: String,
    flag_verify: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::backtracker_mazes::errors::Error, ::backtracker_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_width, args.flag_height)
    };

    let maze = Maze::new(Width(width), Height(height), args.flag_seed)
        .chain_err(|| format!("Failed to generate a {}x{} maze", width, height))?;
    info!("generated {}x{} maze, seed {:?}", width, height, maze.seed());

    if args.flag_verify {
        let report = MazeReport::new(maze.grid());
        println!("{}", report);
        if !report.is_perfect() {
            bail!("generated maze is not a perfect maze");
        }
    }

    let display = maze.display_grid();

    if args.cmd_image {
        display.save_image(&args.flag_image_out, args.flag_cell_pixels)
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    } else if args.cmd_display {
        print!("{}", display);
    } else {
        print!("{}", maze);
    }

    if !args.flag_save_display.is_empty() {
        write_text_to_file(&format!("{}", display), &args.flag_save_display)
            .chain_err(|| format!("Failed to write display grid to text file {}", args.flag_save_display))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let grid = maze.grid();
    let vertices_count = grid.size();
    let edges_count = grid.passage_count();
    let mut graph_data = String::new();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in grid.passages() {
        let (index_a, index_b) = match (grid.grid_coordinate_to_index(src),
                                        grid.grid_coordinate_to_index(dst)) {
            (Some(a), Some(b)) => (a, b),
            _ => bail!("passage {} - {} lies outside of the maze", src, dst),
        };
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
