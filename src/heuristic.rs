use crate::cell::Position;

/// Manhattan distance between two positions.
///
/// Admissible and consistent for 4-directional movement with unit edge cost.
/// Diagonal moves would need a different estimate.
pub fn manhattan(a: Position, b: Position) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
