use crate::cell::{Position, Role};
use crate::grid::{Grid, GridError};
use crate::heuristic::manhattan;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Cost of one orthogonal move
const STEP_COST: u32 = 1;

/// Result of a finished search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Full path from start to end, both included
    Found(Vec<Position>),
    /// Frontier exhausted without reaching the end
    NoPath,
    /// Stopped from outside before finishing
    Aborted,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&[Position]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Found(_) => "found",
            SearchOutcome::NoPath => "no path",
            SearchOutcome::Aborted => "aborted",
        }
    }
}

/// One unit of search progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// A cell was popped from the frontier and its neighbors relaxed
    Expanded(Position),
    /// An interior path cell was marked as Path
    Marked(Position),
    Finished(SearchOutcome),
}

/// Returned by step callbacks to keep going or stop the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells popped from the frontier and expanded
    pub expanded: usize,
    /// Number of moves in the found path
    pub path_len: Option<usize>,
}

/// Frontier entry ordered by (f_score, seq), smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f_score: u32,
    seq: u64,
    position: Position,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f_score
            .cmp(&self.f_score)
            // Tie-breaker: first inserted wins
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
enum Phase {
    Expanding,
    /// Marking interior path cells; `next` indexes into `path`
    Tracing { path: Vec<Position>, next: usize },
    Done(SearchOutcome),
}

/// Incremental A* over a grid's cached neighbor lists.
///
/// Each call to [`AStarSearch::step`] does one unit of work, so a caller can
/// redraw or check for cancellation between steps. Cells are pushed to the
/// frontier at most once, on their first relaxation. Later cheaper relaxations
/// only update the scores. That is sound here because every edge costs the
/// same; weighted edges would need re-insertion with stale-entry skipping.
#[derive(Debug)]
pub struct AStarSearch {
    start: Position,
    end: Position,
    g_score: Vec<u32>,
    f_score: Vec<u32>,
    came_from: Vec<Option<Position>>,
    enqueued: Vec<bool>,
    frontier: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    phase: Phase,
    stats: SearchStats,
}

impl AStarSearch {
    /// Set up per-run state. Neighbor lists must already be refreshed.
    pub fn new(grid: &Grid, start: Position, end: Position) -> Result<Self, GridError> {
        let start_id = grid.checked_index(start)?;
        grid.checked_index(end)?;

        let len = grid.len();
        let mut search = AStarSearch {
            start,
            end,
            g_score: vec![u32::MAX; len],
            f_score: vec![u32::MAX; len],
            came_from: vec![None; len],
            enqueued: vec![false; len],
            frontier: BinaryHeap::new(),
            next_seq: 0,
            phase: Phase::Expanding,
            stats: SearchStats::default(),
        };

        let start_f = manhattan(start, end);
        search.g_score[start_id] = 0;
        search.f_score[start_id] = start_f;
        search.enqueued[start_id] = true;
        search.push(start, start_f);

        log::debug!(
            "A* from ({},{}) to ({},{}), estimate {}",
            start.row, start.col, end.row, end.col, start_f
        );
        Ok(search)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// Outcome once finished
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match &self.phase {
            Phase::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Best known cost from start, None while unreached
    pub fn g_score(&self, grid: &Grid, pos: Position) -> Option<u32> {
        let id = grid.index(pos)?;
        self.g_score.get(id).copied().filter(|&g| g != u32::MAX)
    }

    pub fn f_score(&self, grid: &Grid, pos: Position) -> Option<u32> {
        let id = grid.index(pos)?;
        self.f_score.get(id).copied().filter(|&f| f != u32::MAX)
    }

    fn push(&mut self, position: Position, f_score: u32) {
        self.frontier.push(FrontierEntry {
            f_score,
            seq: self.next_seq,
            position,
        });
        self.next_seq += 1;
    }

    fn finish(&mut self, outcome: SearchOutcome) {
        log::info!(
            "Search {}: {} cells expanded{}",
            outcome.label(),
            self.stats.expanded,
            match self.stats.path_len {
                Some(len) => format!(", path length {}", len),
                None => String::new(),
            }
        );
        self.phase = Phase::Done(outcome);
    }

    /// Stop the run where it is; the grid keeps its partial marks
    pub fn abort(&mut self) {
        if !self.is_finished() {
            self.finish(SearchOutcome::Aborted);
        }
    }

    /// Perform one unit of work
    pub fn step(&mut self, grid: &mut Grid) -> SearchStep {
        if matches!(self.phase, Phase::Tracing { .. }) {
            return self.mark_next(grid);
        }
        if let Phase::Done(outcome) = &self.phase {
            return SearchStep::Finished(outcome.clone());
        }

        let Some(entry) = self.frontier.pop() else {
            self.finish(SearchOutcome::NoPath);
            return SearchStep::Finished(SearchOutcome::NoPath);
        };
        let current = entry.position;

        if current == self.end {
            let path = self.reconstruct(grid, current);
            self.stats.path_len = Some(path.len() - 1);
            self.phase = Phase::Tracing { path, next: 1 };
            return self.mark_next(grid);
        }

        let current_g = match grid.index(current) {
            Some(id) => self.g_score[id],
            None => u32::MAX,
        };

        for &next in grid.neighbors(current) {
            let Some(next_id) = grid.index(next) else {
                continue;
            };
            let candidate = current_g.saturating_add(STEP_COST);
            if candidate < self.g_score[next_id] {
                let f = candidate + manhattan(next, self.end);
                self.g_score[next_id] = candidate;
                self.f_score[next_id] = f;
                if !self.enqueued[next_id] {
                    self.enqueued[next_id] = true;
                    self.came_from[next_id] = Some(current);
                    self.push(next, f);
                }
            }
        }

        self.stats.expanded += 1;
        log::trace!(
            "Expanded ({},{}) f={} g={}, frontier {}",
            current.row, current.col, entry.f_score, current_g, self.frontier.len()
        );

        if current != self.start {
            if let Ok(cell) = grid.cell_at_mut(current) {
                cell.role = Role::Visited;
            }
        }
        SearchStep::Expanded(current)
    }

    /// Mark the next interior path cell, or finish once all are marked
    fn mark_next(&mut self, grid: &mut Grid) -> SearchStep {
        if let Phase::Tracing { path, next } = &mut self.phase {
            // Interior cells are path[1..len - 1]; start and end keep their roles
            if *next + 1 < path.len() {
                let pos = path[*next];
                *next += 1;
                if let Ok(cell) = grid.cell_at_mut(pos) {
                    cell.role = Role::Path;
                }
                return SearchStep::Marked(pos);
            }
            let path = std::mem::take(path);
            self.finish(SearchOutcome::Found(path));
        }
        match &self.phase {
            Phase::Done(outcome) => SearchStep::Finished(outcome.clone()),
            _ => SearchStep::Finished(SearchOutcome::Aborted),
        }
    }

    /// Walk predecessors back from `end` to the start
    fn reconstruct(&self, grid: &Grid, end: Position) -> Vec<Position> {
        let mut path = vec![end];
        let mut current = end;
        while let Some(prev) = grid.index(current).and_then(|id| self.came_from[id]) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }

    /// Drive the search to completion.
    ///
    /// `on_step` runs after every expansion and every path mark, and sees the
    /// grid with that step's marks applied. Returning `StepControl::Abort`
    /// stops the run with `SearchOutcome::Aborted`.
    pub fn run<F>(&mut self, grid: &mut Grid, mut on_step: F) -> SearchOutcome
    where
        F: FnMut(&Grid) -> StepControl,
    {
        loop {
            match self.step(grid) {
                SearchStep::Finished(outcome) => return outcome,
                SearchStep::Expanded(_) | SearchStep::Marked(_) => {
                    if on_step(grid) == StepControl::Abort {
                        self.abort();
                        return SearchOutcome::Aborted;
                    }
                }
            }
        }
    }
}

/// Refresh neighbors and run a search to completion without a step callback
pub fn find_path(grid: &mut Grid, start: Position, end: Position) -> Result<SearchOutcome, GridError> {
    grid.refresh_neighbors();
    let mut search = AStarSearch::new(grid, start, end)?;
    Ok(search.run(grid, |_| StepControl::Continue))
}

/// Format path for display
pub fn format_path(path: &[Position]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    let mut result = String::new();
    for (i, pos) in path.iter().enumerate() {
        if i > 0 {
            result.push_str(" -> ");
        }
        result.push_str(&format!("({},{})", pos.row, pos.col));
    }
    result
}
