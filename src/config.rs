use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Cells per side; fixed for the whole session
    #[serde(default = "default_size")]
    pub size: i32,
    /// Cell edge length in pixels
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Search steps advanced per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: u32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_true")]
    pub show_grid_lines: bool,
    #[serde(default = "default_true")]
    pub show_hud: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_size() -> i32 { 30 }
fn default_cell_size() -> f32 { 25.0 }
fn default_steps_per_frame() -> u32 { 1 }
fn default_window_title() -> String { "A* Path Finding".to_string() }
fn default_true() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            show_grid_lines: true,
            show_hud: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: true,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            search: SearchConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, or use defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load configuration from file, or use defaults if it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    log::warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                log::info!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }

    /// Parse TOML text and clamp values into their usable ranges
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        config.grid.size = config.grid.size.max(1);
        if config.grid.cell_size < 1.0 {
            config.grid.cell_size = default_cell_size();
        }
        config.search.steps_per_frame = config.search.steps_per_frame.max(1);
        Ok(config)
    }

    /// Window edge length in pixels
    pub fn window_size(&self) -> f32 {
        self.grid.size as f32 * self.grid.cell_size
    }
}
