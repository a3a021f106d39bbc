use std::fmt;

#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, Ord, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}
impl Coordinate {
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }
}
impl From<(u32, u32)> for Coordinate {
    fn from(x_y_pair: (u32, u32)) -> Coordinate {
        Coordinate::new(x_y_pair.0, x_y_pair.1)
    }
}
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One side of a cell.
#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, Ord, PartialOrd)]
pub enum Wall {
    Top,
    Right,
    Bottom,
    Left,
}

pub const ALL_WALLS: [Wall; 4] = [Wall::Top, Wall::Right, Wall::Bottom, Wall::Left];

impl Wall {
    /// The wall on the far side of the neighbouring cell that shares this edge.
    #[inline]
    pub fn opposite(self) -> Wall {
        opposite_wall(self)
    }
}

#[inline]
pub fn opposite_wall(wall: Wall) -> Wall {
    match wall {
        Wall::Top => Wall::Bottom,
        Wall::Bottom => Wall::Top,
        Wall::Right => Wall::Left,
        Wall::Left => Wall::Right,
    }
}

/// The named flags a cell state is made of: the four wall flags plus `Visited`.
#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone)]
pub enum CellFlag {
    Top,
    Right,
    Bottom,
    Left,
    Visited,
}

impl From<Wall> for CellFlag {
    fn from(wall: Wall) -> CellFlag {
        match wall {
            Wall::Top => CellFlag::Top,
            Wall::Right => CellFlag::Right,
            Wall::Bottom => CellFlag::Bottom,
            Wall::Left => CellFlag::Left,
        }
    }
}

/// Wall and traversal state of a single cell.
///
/// A set wall flag means that wall is still standing.
#[derive(Hash, Eq, PartialEq, Copy, Clone)]
pub struct CellState {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
    visited: bool,
}

impl CellState {
    /// All four walls standing, not yet visited.
    pub fn initial() -> CellState {
        CellState {
            top: true,
            right: true,
            bottom: true,
            left: true,
            visited: false,
        }
    }

    /// No walls and not visited.
    pub fn empty() -> CellState {
        CellState {
            top: false,
            right: false,
            bottom: false,
            left: false,
            visited: false,
        }
    }

    #[inline]
    pub fn has_flag<F: Into<CellFlag>>(&self, flag: F) -> bool {
        match flag.into() {
            CellFlag::Top => self.top,
            CellFlag::Right => self.right,
            CellFlag::Bottom => self.bottom,
            CellFlag::Left => self.left,
            CellFlag::Visited => self.visited,
        }
    }

    #[inline]
    pub fn has_wall(&self, wall: Wall) -> bool {
        self.has_flag(wall)
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// A copy of this state with `flag` set.
    pub fn with<F: Into<CellFlag>>(mut self, flag: F) -> CellState {
        *self.flag_mut(flag.into()) = true;
        self
    }

    /// A copy of this state with `flag` cleared.
    pub fn without<F: Into<CellFlag>>(mut self, flag: F) -> CellState {
        *self.flag_mut(flag.into()) = false;
        self
    }

    /// Number of walls still standing.
    pub fn walls_count(&self) -> usize {
        ALL_WALLS.iter().filter(|&&wall| self.has_wall(wall)).count()
    }

    fn flag_mut(&mut self, flag: CellFlag) -> &mut bool {
        match flag {
            CellFlag::Top => &mut self.top,
            CellFlag::Right => &mut self.right,
            CellFlag::Bottom => &mut self.bottom,
            CellFlag::Left => &mut self.left,
            CellFlag::Visited => &mut self.visited,
        }
    }
}

impl Default for CellState {
    fn default() -> CellState {
        CellState::initial()
    }
}

/// `has_flag` as a free function over a state.
#[inline]
pub fn has_flag<F: Into<CellFlag>>(state: CellState, flag: F) -> bool {
    state.has_flag(flag)
}

impl fmt::Debug for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names = vec![];
        if self.top {
            names.push("Top");
        }
        if self.right {
            names.push("Right");
        }
        if self.bottom {
            names.push("Bottom");
        }
        if self.left {
            names.push("Left");
        }
        if self.visited {
            names.push("Visited");
        }
        write!(f, "CellState({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn opposite_walls() {
        assert_eq!(opposite_wall(Wall::Top), Wall::Bottom);
        assert_eq!(opposite_wall(Wall::Bottom), Wall::Top);
        assert_eq!(opposite_wall(Wall::Left), Wall::Right);
        assert_eq!(opposite_wall(Wall::Right), Wall::Left);
    }

    #[test]
    fn opposite_is_an_involution() {
        for wall in ALL_WALLS.iter() {
            assert_eq!(wall.opposite().opposite(), *wall);
            assert_ne!(wall.opposite(), *wall);
        }
    }

    #[test]
    fn initial_state_has_all_walls_and_is_unvisited() {
        let s = CellState::initial();
        for wall in ALL_WALLS.iter() {
            assert!(s.has_wall(*wall));
        }
        assert!(!s.has_flag(CellFlag::Visited));
        assert_eq!(s.walls_count(), 4);
        assert_eq!(CellState::default(), s);
    }

    #[test]
    fn flags_are_independent() {
        let s = CellState::initial().without(Wall::Left).with(CellFlag::Visited);
        assert!(s.has_flag(CellFlag::Top));
        assert!(s.has_flag(CellFlag::Right));
        assert!(s.has_flag(CellFlag::Bottom));
        assert!(!s.has_flag(CellFlag::Left));
        assert!(s.is_visited());
        assert!(has_flag(s, Wall::Top));
        assert!(!has_flag(s, Wall::Left));
        assert_eq!(s.walls_count(), 3);
    }

    #[test]
    fn empty_state() {
        let s = CellState::empty();
        assert_eq!(s.walls_count(), 0);
        assert!(!s.is_visited());
    }

    #[test]
    fn debug_lists_set_flags() {
        let s = CellState::empty().with(Wall::Top).with(CellFlag::Visited);
        assert_eq!(format!("{:?}", s), "CellState(Top | Visited)");
    }
}
