use serde::{Deserialize, Serialize};

/// A (row, col) coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Position shifted by (d_row, d_col), which may fall outside the grid
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Position::new(self.row + d_row, self.col + d_col)
    }
}

/// Mutually exclusive state of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Obstacle,
    Visited,
    Path,
}

impl Role {
    /// Layout symbol used by text export and test fixtures
    pub fn symbol(self) -> char {
        match self {
            Role::Empty => '□',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Obstacle => '■',
            Role::Visited => 'x',
            Role::Path => '*',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '□' | '.' => Some(Role::Empty),
            'S' => Some(Role::Start),
            'E' => Some(Role::End),
            '■' | '#' => Some(Role::Obstacle),
            'x' => Some(Role::Visited),
            '*' => Some(Role::Path),
            _ => None,
        }
    }
}

/// One addressable unit of the grid
///
/// `neighbors` is a cached view computed by `Grid::refresh_neighbors` and is
/// stale until the next refresh.
#[derive(Debug, Clone)]
pub struct Cell {
    position: Position,
    pub role: Role,
    pub(crate) neighbors: Vec<Position>,
}

impl Cell {
    pub fn new(position: Position) -> Self {
        Cell {
            position,
            role: Role::Empty,
            neighbors: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Walkable orthogonal neighbors as of the last refresh
    pub fn neighbors(&self) -> &[Position] {
        &self.neighbors
    }

    pub fn is_obstacle(&self) -> bool {
        self.role == Role::Obstacle
    }
}
