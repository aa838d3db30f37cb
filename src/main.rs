use arboard::Clipboard;
use astar_grid::action_log::{Action, ActionLog};
use astar_grid::config::Config;
use astar_grid::input::position_from_pixels;
use astar_grid::layout::to_layout;
use astar_grid::pathfinding::SearchStep;
use astar_grid::{Flow, Grid, InputEvent, InteractionController, Mode, Renderer, Role};
use macroquad::prelude::*;
use std::io::Write;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Empty => WHITE,
        Role::Start => YELLOW,
        Role::End => BLUE,
        Role::Obstacle => BLACK,
        Role::Visited => RED,
        Role::Path => GREEN,
    }
}

/// Collects this frame's mouse and keyboard actions as input events
struct MacroquadInput {
    cell_size: f32,
    size: i32,
}

impl MacroquadInput {
    fn poll(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let (mouse_x, mouse_y) = mouse_position();
        let pos = position_from_pixels(mouse_x, mouse_y, self.cell_size, self.size);

        if let Some(pos) = pos {
            if is_mouse_button_down(MouseButton::Left) {
                events.push(InputEvent::Place(pos));
            } else if is_mouse_button_down(MouseButton::Right) {
                events.push(InputEvent::Clear(pos));
            }
        }

        if is_key_pressed(KeyCode::Space) {
            events.push(InputEvent::RunSearch);
        }
        if is_key_pressed(KeyCode::Enter) {
            events.push(InputEvent::ResetGrid);
        }
        if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
            events.push(InputEvent::Quit);
        }
        events
    }
}

/// Draws cells, grid lines and the status text
struct MacroquadRenderer {
    cell_size: f32,
    show_grid_lines: bool,
    status: Option<String>,
}

impl Renderer for MacroquadRenderer {
    fn draw(&mut self, grid: &Grid) {
        clear_background(WHITE);

        for cell in grid.cells() {
            let pos = cell.position();
            let px = pos.col as f32 * self.cell_size;
            let py = pos.row as f32 * self.cell_size;
            draw_rectangle(px, py, self.cell_size, self.cell_size, role_color(cell.role));
        }

        if self.show_grid_lines {
            let extent = grid.size() as f32 * self.cell_size;
            for i in 0..=grid.size() {
                let offset = i as f32 * self.cell_size;
                draw_line(0.0, offset, extent, offset, 1.0, GRAY);
                draw_line(offset, 0.0, offset, extent, 1.0, GRAY);
            }
        }

        if let Some(status) = &self.status {
            draw_text(status, 10.0, 20.0, 20.0, DARKGRAY);
        }
    }
}

fn status_line(controller: &InteractionController) -> String {
    let mode = match controller.mode() {
        Mode::Editing => "Editing",
        Mode::Running => "Running",
    };
    let mut status = format!("{} | LMB place, RMB clear, Space run, Enter reset, C copy", mode);
    if let Some(stats) = controller.last_stats() {
        status.push_str(&format!(" | expanded {}", stats.expanded));
        if let Some(len) = stats.path_len {
            status.push_str(&format!(", path {}", len));
        }
    }
    if let Some(outcome) = controller.last_outcome() {
        if !controller.is_running() {
            status.push_str(&format!(" | {}", outcome.label()));
        }
    }
    status
}

fn copy_to_clipboard(grid: &Grid) {
    let layout = to_layout(grid);
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(layout) {
                log::warn!("Failed to copy to clipboard: {}", e);
            } else {
                log::info!("Grid layout copied to clipboard");
                // Keep clipboard alive for a moment so clipboard managers can capture it
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
        }
        Err(e) => log::warn!("Failed to access clipboard: {}", e),
    }
}

fn window_conf() -> Conf {
    init_logging();
    let config = config();
    let window_size = config.window_size() as i32;
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: window_size,
        window_height: window_size,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    prevent_quit();

    let mut controller = InteractionController::new(config.grid.size);
    let input = MacroquadInput {
        cell_size: config.grid.cell_size,
        size: config.grid.size,
    };
    let mut renderer = MacroquadRenderer {
        cell_size: config.grid.cell_size,
        show_grid_lines: config.visual.show_grid_lines,
        status: None,
    };
    let mut action_log = ActionLog::new();

    'session: loop {
        for event in input.poll() {
            // Held mouse buttons repeat every frame; only log edits that change a cell
            let target = event.position();
            let before = target.and_then(|pos| controller.grid().role(pos).ok());
            let was_running = controller.is_running();

            let flow = controller.handle(event);

            let after = target.and_then(|pos| controller.grid().role(pos).ok());
            if target.is_none() || before != after {
                action_log.log_input(event);
            }
            if was_running && !controller.is_running() {
                if let (Some(outcome), Some(stats)) = (controller.last_outcome(), controller.last_stats()) {
                    action_log.log_outcome(outcome, stats);
                }
            }
            if flow == Flow::Quit {
                break 'session;
            }
        }

        if is_key_pressed(KeyCode::C) {
            copy_to_clipboard(controller.grid());
            action_log.log(Action::CopyLayout);
        }

        for _ in 0..config.search.steps_per_frame {
            match controller.tick() {
                Some(SearchStep::Finished(outcome)) => {
                    if let Some(stats) = controller.last_stats() {
                        action_log.log_outcome(&outcome, stats);
                    }
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }

        renderer.status = config.visual.show_hud.then(|| status_line(&controller));
        renderer.draw(controller.grid());

        next_frame().await
    }

    log::info!("{}", action_log.summary());
    if config.logging.enable_action_log {
        match action_log.save_to_file(&config.logging.action_log_path) {
            Ok(()) => log::info!("Action log saved to {}", config.logging.action_log_path),
            Err(e) => log::warn!("{}", e),
        }
    }
}
