use crate::grid::Grid;
use crate::layout::to_layout;

/// Draws the current cell state. Must not mutate the grid.
pub trait Renderer {
    fn draw(&mut self, grid: &Grid);
}

/// Records every frame as a text layout
#[derive(Debug, Default)]
pub struct TextRenderer {
    frames: Vec<String>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, grid: &Grid) {
        self.frames.push(to_layout(grid));
    }
}
