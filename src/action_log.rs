use crate::input::InputEvent;
use crate::pathfinding::{SearchOutcome, SearchStats};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionLogError {
    #[error("failed to serialize action log: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write action log: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that happened during a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// A user event as it was dispatched
    Input(InputEvent),
    /// A search run ended
    SearchFinished {
        outcome: String,
        expanded: usize,
        path_len: Option<usize>,
    },
    /// Layout copied to the clipboard
    CopyLayout,
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Session action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
        });
    }

    pub fn log_input(&mut self, event: InputEvent) {
        self.log(Action::Input(event));
    }

    pub fn log_outcome(&mut self, outcome: &SearchOutcome, stats: SearchStats) {
        self.log(Action::SearchFinished {
            outcome: outcome.label().to_string(),
            expanded: stats.expanded,
            path_len: stats.path_len,
        });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_json(&self) -> Result<String, ActionLogError> {
        Ok(serde_json::to_string_pretty(&self.actions)?)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), ActionLogError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut edits = 0;
        let mut runs = 0;
        let mut resets = 0;
        let mut found = 0;
        let mut no_path = 0;
        let mut aborted = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::Input(event) if event.is_edit() => edits += 1,
                Action::Input(InputEvent::RunSearch) => runs += 1,
                Action::Input(InputEvent::ResetGrid) => resets += 1,
                Action::SearchFinished { outcome, .. } => match outcome.as_str() {
                    "found" => found += 1,
                    "no path" => no_path += 1,
                    _ => aborted += 1,
                },
                _ => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms, Total Events: {}\n\
             Edits: {}, Run requests: {}, Resets: {}\n\
             Searches: {} found, {} no path, {} aborted",
            duration,
            self.actions.len(),
            edits,
            runs,
            resets,
            found,
            no_path,
            aborted
        )
    }
}
