pub mod action_log;
pub mod cell;
pub mod config;
pub mod controller;
pub mod grid;
pub mod heuristic;
pub mod input;
pub mod layout;
pub mod pathfinding;
pub mod render;

pub use cell::{Cell, Position, Role};
pub use controller::{Flow, InteractionController, Mode};
pub use grid::{Grid, GridError};
pub use input::{InputEvent, InputSource};
pub use pathfinding::{find_path, AStarSearch, SearchOutcome, SearchStep, StepControl};
pub use render::Renderer;
