use crate::cell::Position;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Discrete user actions fed to the interaction controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary click: becomes Start, then End, then Obstacle
    Place(Position),
    PlaceStart(Position),
    PlaceEnd(Position),
    PlaceObstacle(Position),
    /// Secondary click: reset the cell to Empty
    Clear(Position),
    RunSearch,
    ResetGrid,
    Quit,
}

impl InputEvent {
    /// Target cell of an edit event
    pub fn position(&self) -> Option<Position> {
        match *self {
            InputEvent::Place(pos)
            | InputEvent::PlaceStart(pos)
            | InputEvent::PlaceEnd(pos)
            | InputEvent::PlaceObstacle(pos)
            | InputEvent::Clear(pos) => Some(pos),
            InputEvent::RunSearch | InputEvent::ResetGrid | InputEvent::Quit => None,
        }
    }

    /// Events that edit a single cell and are ignored while a search runs
    pub fn is_edit(&self) -> bool {
        self.position().is_some()
    }
}

/// Pull-style event source. `None` means no event is pending.
pub trait InputSource {
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// Replays a fixed queue of events
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        ScriptedInput {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Map window pixel coordinates to a grid position, None outside the grid
pub fn position_from_pixels(x: f32, y: f32, cell_size: f32, size: i32) -> Option<Position> {
    if x < 0.0 || y < 0.0 || cell_size <= 0.0 {
        return None;
    }
    let row = (y / cell_size) as i32;
    let col = (x / cell_size) as i32;
    if row < size && col < size {
        Some(Position::new(row, col))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_pixels() {
        assert_eq!(position_from_pixels(0.0, 0.0, 25.0, 30), Some(Position::new(0, 0)));
        // x selects the column, y selects the row
        assert_eq!(position_from_pixels(60.0, 26.0, 25.0, 30), Some(Position::new(1, 2)));
        assert_eq!(position_from_pixels(749.9, 749.9, 25.0, 30), Some(Position::new(29, 29)));
    }

    #[test]
    fn test_position_from_pixels_outside() {
        assert_eq!(position_from_pixels(750.0, 10.0, 25.0, 30), None);
        assert_eq!(position_from_pixels(10.0, 750.0, 25.0, 30), None);
        assert_eq!(position_from_pixels(-0.5, 10.0, 25.0, 30), None);
        assert_eq!(position_from_pixels(10.0, 10.0, 0.0, 30), None);
    }

    #[test]
    fn test_scripted_input_drains_in_order() {
        let mut input = ScriptedInput::new([InputEvent::RunSearch, InputEvent::Quit]);
        input.push(InputEvent::ResetGrid);
        assert_eq!(input.remaining(), 3);
        assert_eq!(input.next_event(), Some(InputEvent::RunSearch));
        assert_eq!(input.next_event(), Some(InputEvent::Quit));
        assert_eq!(input.next_event(), Some(InputEvent::ResetGrid));
        assert_eq!(input.next_event(), None);
    }
}
