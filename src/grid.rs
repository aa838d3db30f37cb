use crate::cell::{Cell, Position, Role};
use thiserror::Error;

/// Orthogonal moves in neighbor order: up, down, left, right
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("position ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: i32, col: i32, size: i32 },
}

/// Square arena of cells addressed by position
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a size x size grid with every cell Empty
    pub fn new(size: i32) -> Self {
        let size = size.max(1);
        let mut cells = Vec::with_capacity((size * size) as usize);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Position::new(row, col)));
            }
        }
        Grid { size, cells }
    }

    /// Create a grid with the given positions set to Obstacle
    pub fn with_obstacles(size: i32, obstacles: &[Position]) -> Self {
        let mut grid = Self::new(size);
        for &pos in obstacles {
            if let Some(id) = grid.index(pos) {
                grid.cells[id].role = Role::Obstacle;
            }
        }
        grid
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.size && pos.col >= 0 && pos.col < self.size
    }

    /// Row-major cell index, or None outside the grid
    pub fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.row * self.size + pos.col) as usize)
        } else {
            None
        }
    }

    /// Convert a row-major index back to a position
    pub fn position_of(&self, id: usize) -> Position {
        let id = id as i32;
        Position::new(id / self.size, id % self.size)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn out_of_bounds(&self, pos: Position) -> GridError {
        GridError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            size: self.size,
        }
    }

    /// Like `index`, but reports OutOfBounds
    pub fn checked_index(&self, pos: Position) -> Result<usize, GridError> {
        self.index(pos).ok_or_else(|| self.out_of_bounds(pos))
    }

    pub fn cell_at(&self, pos: Position) -> Result<&Cell, GridError> {
        let id = self.checked_index(pos)?;
        Ok(&self.cells[id])
    }

    pub fn cell_at_mut(&mut self, pos: Position) -> Result<&mut Cell, GridError> {
        let id = self.checked_index(pos)?;
        Ok(&mut self.cells[id])
    }

    pub fn role(&self, pos: Position) -> Result<Role, GridError> {
        self.cell_at(pos).map(|cell| cell.role)
    }

    pub fn set_role(&mut self, pos: Position, role: Role) -> Result<(), GridError> {
        self.cell_at_mut(pos)?.role = role;
        Ok(())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All positions currently holding `role`, in row-major order
    pub fn positions_with(&self, role: Role) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.role == role)
            .map(|cell| cell.position())
            .collect()
    }

    pub fn count(&self, role: Role) -> usize {
        self.cells.iter().filter(|cell| cell.role == role).count()
    }

    /// Cached neighbors of `pos`; empty for out-of-bounds positions
    pub fn neighbors(&self, pos: Position) -> &[Position] {
        match self.index(pos) {
            Some(id) => self.cells[id].neighbors(),
            None => &[],
        }
    }

    /// Recompute every cell's walkable neighbor list from the current obstacles
    pub fn refresh_neighbors(&mut self) {
        for id in 0..self.cells.len() {
            let pos = self.cells[id].position();
            let neighbors: Vec<Position> = DIRECTIONS
                .iter()
                .map(|&(d_row, d_col)| pos.offset(d_row, d_col))
                .filter(|&next| match self.index(next) {
                    Some(next_id) => !self.cells[next_id].is_obstacle(),
                    None => false,
                })
                .collect();
            self.cells[id].neighbors = neighbors;
        }
    }

    /// Replace every cell with a fresh Empty cell at the same position
    pub fn reset(&mut self) {
        *self = Grid::new(self.size);
    }
}
