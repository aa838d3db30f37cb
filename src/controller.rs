use crate::cell::{Position, Role};
use crate::grid::Grid;
use crate::input::{InputEvent, InputSource};
use crate::pathfinding::{AStarSearch, SearchOutcome, SearchStats, SearchStep};
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Running,
}

/// Whether the interaction loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the grid and applies user events to it.
///
/// While a search is running, cell edits are ignored; reset and quit abort
/// the run. The search advances one step per [`InteractionController::tick`].
pub struct InteractionController {
    grid: Grid,
    start: Option<Position>,
    end: Option<Position>,
    search: Option<AStarSearch>,
    last_outcome: Option<SearchOutcome>,
    last_stats: Option<SearchStats>,
}

impl InteractionController {
    pub fn new(size: i32) -> Self {
        Self::from_grid(Grid::new(size))
    }

    /// Take over an existing grid, picking up its Start and End cells
    pub fn from_grid(grid: Grid) -> Self {
        let start = grid.positions_with(Role::Start).first().copied();
        let end = grid.positions_with(Role::End).first().copied();
        InteractionController {
            grid,
            start,
            end,
            search: None,
            last_outcome: None,
            last_stats: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    pub fn mode(&self) -> Mode {
        if self.search.is_some() {
            Mode::Running
        } else {
            Mode::Editing
        }
    }

    pub fn is_running(&self) -> bool {
        self.search.is_some()
    }

    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Stats of the running search, or of the last finished one
    pub fn last_stats(&self) -> Option<SearchStats> {
        match &self.search {
            Some(search) => Some(search.stats()),
            None => self.last_stats,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => {
                self.abort_running();
                log::info!("Quit requested");
                return Flow::Quit;
            }
            InputEvent::ResetGrid => {
                self.abort_running();
                self.grid.reset();
                self.start = None;
                self.end = None;
                log::info!("Grid reset");
                return Flow::Continue;
            }
            _ if self.is_running() => {
                log::debug!("Ignoring {:?} while a search is running", event);
                return Flow::Continue;
            }
            _ => {}
        }

        if let Some(pos) = event.position() {
            if !self.grid.in_bounds(pos) {
                log::debug!("Dropping {:?}: outside the grid", event);
                return Flow::Continue;
            }
        }

        match event {
            InputEvent::Place(pos) => self.place(pos),
            InputEvent::PlaceStart(pos) => self.place_start(pos),
            InputEvent::PlaceEnd(pos) => self.place_end(pos),
            InputEvent::PlaceObstacle(pos) => self.place_obstacle(pos),
            InputEvent::Clear(pos) => self.clear(pos),
            InputEvent::RunSearch => self.start_search(),
            InputEvent::ResetGrid | InputEvent::Quit => {}
        }
        Flow::Continue
    }

    /// Start first, then End, then Obstacle
    fn place(&mut self, pos: Position) {
        let is_start = self.start == Some(pos);
        let is_end = self.end == Some(pos);

        if self.start.is_none() && !is_end {
            self.place_start(pos);
        } else if self.end.is_none() && !is_start {
            self.place_end(pos);
        } else if !is_start && !is_end {
            self.place_obstacle(pos);
        }
    }

    fn place_start(&mut self, pos: Position) {
        if self.end == Some(pos) {
            log::debug!("Cannot place start on the end cell");
            return;
        }
        if let Some(prev) = self.start.replace(pos) {
            if prev != pos {
                self.set_role(prev, Role::Empty);
            }
        }
        self.set_role(pos, Role::Start);
    }

    fn place_end(&mut self, pos: Position) {
        if self.start == Some(pos) {
            log::debug!("Cannot place end on the start cell");
            return;
        }
        if let Some(prev) = self.end.replace(pos) {
            if prev != pos {
                self.set_role(prev, Role::Empty);
            }
        }
        self.set_role(pos, Role::End);
    }

    fn place_obstacle(&mut self, pos: Position) {
        if self.start == Some(pos) || self.end == Some(pos) {
            return;
        }
        self.set_role(pos, Role::Obstacle);
    }

    fn clear(&mut self, pos: Position) {
        self.set_role(pos, Role::Empty);
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
    }

    fn set_role(&mut self, pos: Position, role: Role) {
        if let Err(e) = self.grid.set_role(pos, role) {
            log::warn!("Edit dropped: {}", e);
        }
    }

    fn start_search(&mut self) {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            log::debug!("Run ignored: start and end must both be set");
            return;
        };

        self.grid.refresh_neighbors();
        match AStarSearch::new(&self.grid, start, end) {
            Ok(search) => {
                log::info!(
                    "Search started: ({},{}) -> ({},{})",
                    start.row, start.col, end.row, end.col
                );
                self.search = Some(search);
            }
            Err(e) => log::warn!("Search not started: {}", e),
        }
    }

    fn abort_running(&mut self) {
        if let Some(mut search) = self.search.take() {
            search.abort();
            self.last_stats = Some(search.stats());
            self.last_outcome = Some(SearchOutcome::Aborted);
        }
    }

    /// Advance a running search by one step.
    ///
    /// Returns None in Editing mode. On `SearchStep::Finished` the controller
    /// is back in Editing.
    pub fn tick(&mut self) -> Option<SearchStep> {
        let search = self.search.as_mut()?;
        let step = search.step(&mut self.grid);
        if let SearchStep::Finished(outcome) = &step {
            self.last_stats = Some(search.stats());
            self.last_outcome = Some(outcome.clone());
            self.search = None;
        }
        Some(step)
    }

    /// Blocking session loop over a pull-style input source.
    ///
    /// Draws after each handled event and after each search step. While a
    /// search runs, one pending event is polled between steps, so reset and
    /// quit take effect promptly. Returns when the input runs dry or on quit.
    pub fn run<I, R>(&mut self, input: &mut I, renderer: &mut R) -> Flow
    where
        I: InputSource,
        R: Renderer,
    {
        renderer.draw(&self.grid);
        while let Some(event) = input.next_event() {
            if self.handle(event) == Flow::Quit {
                return Flow::Quit;
            }
            renderer.draw(&self.grid);

            while self.is_running() {
                match self.tick() {
                    Some(SearchStep::Expanded(_)) | Some(SearchStep::Marked(_)) => {
                        renderer.draw(&self.grid);
                    }
                    Some(SearchStep::Finished(_)) | None => break,
                }
                if let Some(event) = input.next_event() {
                    if self.handle(event) == Flow::Quit {
                        return Flow::Quit;
                    }
                    if !event.is_edit() {
                        renderer.draw(&self.grid);
                    }
                }
            }
        }
        Flow::Continue
    }
}
