use crate::cell::{Position, Role};
use crate::grid::Grid;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {width} cells, expected {expected}")]
    NotSquare { row: usize, width: usize, expected: usize },
    #[error("unknown symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("more than one {0:?} cell")]
    Duplicate(Role),
}

/// Grid parsed from text with the start and end it contained
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub start: Option<Position>,
    pub end: Option<Position>,
}

/// Render the grid as one line of role symbols per row
pub fn to_layout(grid: &Grid) -> String {
    let size = grid.size() as usize;
    let mut result = String::with_capacity(size * (size + 1) * 3);
    for cell in grid.cells() {
        result.push(cell.role.symbol());
        if cell.position().col == grid.size() - 1 {
            result.push('\n');
        }
    }
    result
}

/// Parse a square text layout.
///
/// Symbols: `S` start, `E` end, `■`/`#` obstacle, `□`/`.` empty, `x` visited,
/// `*` path. Blank lines and surrounding whitespace are ignored.
pub fn parse_layout(text: &str) -> Result<Layout, LayoutError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(LayoutError::Empty);
    }

    let size = rows.len();
    let mut grid = Grid::new(size as i32);
    let mut start = None;
    let mut end = None;

    for (row, line) in rows.iter().enumerate() {
        let width = line.chars().count();
        if width != size {
            return Err(LayoutError::NotSquare {
                row,
                width,
                expected: size,
            });
        }

        for (col, symbol) in line.chars().enumerate() {
            let role = Role::from_symbol(symbol)
                .ok_or(LayoutError::UnknownSymbol { symbol, row, col })?;
            let pos = Position::new(row as i32, col as i32);

            let slot = match role {
                Role::Start => Some(&mut start),
                Role::End => Some(&mut end),
                _ => None,
            };
            if let Some(slot) = slot {
                if slot.replace(pos).is_some() {
                    return Err(LayoutError::Duplicate(role));
                }
            }

            if let Ok(cell) = grid.cell_at_mut(pos) {
                cell.role = role;
            }
        }
    }

    Ok(Layout { grid, start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let layout = parse_layout(
            "
            S□□
            □■□
            □□E
            ",
        )
        .unwrap();

        assert_eq!(layout.grid.size(), 3);
        assert_eq!(layout.start, Some(Position::new(0, 0)));
        assert_eq!(layout.end, Some(Position::new(2, 2)));
        assert_eq!(layout.grid.role(Position::new(1, 1)), Ok(Role::Obstacle));
    }

    #[test]
    fn test_to_layout_matches_parsed_text() {
        let text = "S.#\n.x*\n..E\n";
        let layout = parse_layout(text).unwrap();
        assert_eq!(to_layout(&layout.grid), "S□■\n□x*\n□□E\n");
    }

    #[test]
    fn test_parse_layout_errors() {
        assert_eq!(parse_layout("\n  \n").unwrap_err(), LayoutError::Empty);
        assert_eq!(
            parse_layout("S..\n..\n..E").unwrap_err(),
            LayoutError::NotSquare { row: 1, width: 2, expected: 3 }
        );
        assert_eq!(
            parse_layout("S?\n.E").unwrap_err(),
            LayoutError::UnknownSymbol { symbol: '?', row: 0, col: 1 }
        );
        assert_eq!(parse_layout("SS\n.E").unwrap_err(), LayoutError::Duplicate(Role::Start));
    }
}
