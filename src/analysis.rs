//! Structural checks on a carved grid: is it a perfect maze?

use petgraph::algo;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use std::fmt;

use crate::cells::{Coordinate, Wall};
use crate::grid::Grid;
use crate::units::{EdgesCount, NodesCount};

/// Cells as nodes (in row major order) and passages as edges.
pub type PassageGraph = Graph<Coordinate, (), Undirected>;

pub fn passage_graph(grid: &Grid) -> PassageGraph {
    let (NodesCount(nodes), EdgesCount(edges)) = grid.graph_size();
    let mut graph = PassageGraph::with_capacity(nodes, edges);
    for coord in grid.iter() {
        let _ = graph.add_node(coord);
    }
    for (a, b) in grid.passages() {
        if let (Some(a_index), Some(b_index)) = (grid.grid_coordinate_to_index(a),
                                                 grid.grid_coordinate_to_index(b)) {
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
    }
    graph
}

/// Number of disjoint regions of cells that cannot reach one another.
pub fn connected_components(grid: &Grid) -> usize {
    algo::connected_components(&passage_graph(grid))
}

/// Is there more than one route between some pair of cells?
pub fn has_cycle(grid: &Grid) -> bool {
    algo::is_cyclic_undirected(&passage_graph(grid))
}

/// A perfect maze is a spanning tree: all cells connected with exactly one route between
/// any two of them.
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let graph = passage_graph(grid);
    graph.edge_count() + 1 == graph.node_count() && algo::connected_components(&graph) == 1
}

pub fn all_visited(grid: &Grid) -> bool {
    grid.iter().all(|coord| grid[coord].is_visited())
}

/// Does every interior edge agree about its wall on both sides?
pub fn is_wall_symmetric(grid: &Grid) -> bool {
    grid.iter().all(|coord| {
        [Wall::Right, Wall::Bottom].iter().all(|&wall| {
            grid.neighbour_at_wall(coord, wall).map_or(true, |neighbour| {
                grid[coord].has_wall(wall) == grid[neighbour].has_wall(wall.opposite())
            })
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeReport {
    pub cells: usize,
    pub passages: usize,
    pub components: usize,
    pub has_cycle: bool,
    pub all_visited: bool,
    pub wall_symmetric: bool,
}

impl MazeReport {
    pub fn new(grid: &Grid) -> MazeReport {
        let graph = passage_graph(grid);
        MazeReport {
            cells: graph.node_count(),
            passages: graph.edge_count(),
            components: algo::connected_components(&graph),
            has_cycle: algo::is_cyclic_undirected(&graph),
            all_visited: all_visited(grid),
            wall_symmetric: is_wall_symmetric(grid),
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.components == 1 && !self.has_cycle && self.passages + 1 == self.cells &&
        self.all_visited && self.wall_symmetric
    }
}

impl fmt::Display for MazeReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "cells: {}, passages: {}, regions: {}, cycles: {}, all visited: {}, \
                walls symmetric: {}, perfect: {}",
               self.cells,
               self.passages,
               self.components,
               self.has_cycle,
               self.all_visited,
               self.wall_symmetric,
               self.is_perfect())
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CellState;
    use crate::units::{Height, Width};

    fn walled_grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).unwrap()
    }

    fn visit_all(g: &mut Grid) {
        let coords: Vec<Coordinate> = g.iter().collect();
        for coord in coords {
            g.mark_visited(coord);
        }
    }

    #[test]
    fn fully_walled_grid_is_disconnected() {
        let g = walled_grid(3, 2);
        assert_eq!(connected_components(&g), 6);
        assert!(!has_cycle(&g));
        assert!(!is_perfect_maze(&g));
        assert!(!all_visited(&g));
        assert!(is_wall_symmetric(&g));
    }

    #[test]
    fn single_cell_is_a_perfect_maze() {
        let g = walled_grid(1, 1);
        assert!(is_perfect_maze(&g));
        assert_eq!(passage_graph(&g).node_count(), 1);
    }

    #[test]
    fn snake_path_is_perfect() {
        // 2x2: (0,0) -> (1,0) -> (1,1) -> (0,1)
        let mut g = walled_grid(2, 2);
        g.remove_wall(Coordinate::new(0, 0), Wall::Right);
        g.remove_wall(Coordinate::new(1, 0), Wall::Bottom);
        g.remove_wall(Coordinate::new(1, 1), Wall::Left);
        visit_all(&mut g);

        assert!(is_perfect_maze(&g));
        let report = MazeReport::new(&g);
        assert!(report.is_perfect());
        assert_eq!(report.passages, 3);
        assert_eq!(report.components, 1);
    }

    #[test]
    fn loop_is_not_perfect() {
        let mut g = walled_grid(2, 2);
        g.remove_wall(Coordinate::new(0, 0), Wall::Right);
        g.remove_wall(Coordinate::new(1, 0), Wall::Bottom);
        g.remove_wall(Coordinate::new(1, 1), Wall::Left);
        g.remove_wall(Coordinate::new(0, 1), Wall::Top);
        visit_all(&mut g);

        assert!(has_cycle(&g));
        assert_eq!(connected_components(&g), 1);
        assert!(!is_perfect_maze(&g));
        assert!(!MazeReport::new(&g).is_perfect());
    }

    #[test]
    fn one_sided_wall_breaks_symmetry() {
        let mut g = walled_grid(2, 1);
        g.set(0, 0, CellState::initial().without(Wall::Right));
        assert!(!is_wall_symmetric(&g));
        assert!(!MazeReport::new(&g).is_perfect());
    }

    #[test]
    fn report_text() {
        let g = walled_grid(1, 1);
        let text = format!("{}", MazeReport::new(&g));
        assert_eq!(text,
                   "cells: 1, passages: 0, regions: 1, cycles: false, all visited: false, \
                    walls symmetric: true, perfect: false");
    }
}
