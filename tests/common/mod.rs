#![allow(dead_code)]

use astar_grid::layout::{parse_layout, Layout};
use astar_grid::{Grid, Position, Role};
use std::collections::{HashSet, VecDeque};

/// Parse a test layout, panicking on malformed fixtures
pub fn layout(text: &str) -> Layout {
    parse_layout(text).unwrap_or_else(|e| panic!("bad test layout: {}", e))
}

/// Visualize a path on a grid
pub fn visualize_path(grid: &Grid, path: &[Position]) -> String {
    let mut result = String::new();
    result.push_str(&format!("Length: {} moves\n", path.len().saturating_sub(1)));

    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let pos = Position::new(row, col);
            let symbol = if path.first() == Some(&pos) {
                'S'
            } else if path.last() == Some(&pos) {
                'E'
            } else if path.contains(&pos) {
                '*'
            } else if grid.role(pos) == Ok(Role::Obstacle) {
                '█'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Every consecutive pair of positions is one orthogonal move apart
pub fn is_contiguous(path: &[Position]) -> bool {
    path.windows(2).all(|pair| {
        let d_row = (pair[0].row - pair[1].row).abs();
        let d_col = (pair[0].col - pair[1].col).abs();
        d_row + d_col == 1
    })
}

/// Breadth-first distance through non-obstacle cells
pub fn bfs_distance(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0)]);
    while let Some((pos, dist)) = queue.pop_front() {
        if pos == end {
            return Some(dist);
        }
        for (d_row, d_col) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let next = pos.offset(d_row, d_col);
            if grid.in_bounds(next)
                && grid.role(next) != Ok(Role::Obstacle)
                && seen.insert(next)
            {
                queue.push_back((next, dist + 1));
            }
        }
    }
    None
}

/// Small deterministic generator for scattered obstacle fixtures
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        XorShift(seed.max(1))
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Grid with roughly `percent`% of cells set to Obstacle
pub fn scattered_grid(size: i32, percent: u64, rng: &mut XorShift) -> Grid {
    let mut obstacles = Vec::new();
    for row in 0..size {
        for col in 0..size {
            if rng.below(100) < percent {
                obstacles.push(Position::new(row, col));
            }
        }
    }
    Grid::with_obstacles(size, &obstacles)
}
