use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
}

#[derive(Debug, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u32,
    #[serde(default = "default_wait_for_start")]
    pub wait_for_start: bool,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_cell_size")]
    pub cell_size: i32,
    #[serde(default = "default_cell_margin")]
    pub cell_margin: i32,
    #[serde(default = "default_dirt_size")]
    pub dirt_size: i32,
    /// Dirt units represented by one speck
    #[serde(default = "default_dirt_per_speck")]
    pub dirt_per_speck: u32,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Empty for no log file
    #[serde(default)]
    pub log_file: String,
}

// Default values
fn default_width() -> i32 { 1290 }
fn default_height() -> i32 { 720 }
fn default_ticks_per_second() -> u32 { 10 }
fn default_wait_for_start() -> bool { true }
fn default_cell_size() -> i32 { 30 }
fn default_cell_margin() -> i32 { 1 }
fn default_dirt_size() -> i32 { 3 }
fn default_dirt_per_speck() -> u32 { 3 }
fn default_font_size() -> u16 { 40 }
fn default_log_level() -> String { "info".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: default_ticks_per_second(),
            wait_for_start: default_wait_for_start(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            cell_margin: default_cell_margin(),
            dirt_size: default_dirt_size(),
            dirt_per_speck: default_dirt_per_speck(),
            font_size: default_font_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if the file doesn't exist
    ///
    /// Runs before the logger exists, so outcomes are reported through
    /// [`Config::report`] once logging is up.
    pub fn load(path: &Path) -> (Self, ConfigSource) {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, ConfigSource::File),
                Err(e) => (Config::default(), ConfigSource::Invalid(e.to_string())),
            },
            Err(_) => (Config::default(), ConfigSource::Missing),
        }
    }

    /// Visible window extent in whole cells
    pub fn visible_cells(&self) -> (i32, i32) {
        let cell = self.visual.cell_size.max(1);
        (self.window.width / cell, self.window.height / cell)
    }

    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.playback.ticks_per_second.max(1))
    }
}

/// Where the configuration came from
#[derive(Debug, PartialEq)]
pub enum ConfigSource {
    File,
    Missing,
    Invalid(String),
}

impl ConfigSource {
    pub fn report(&self, path: &Path) {
        match self {
            ConfigSource::File => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing => {
                info!("No {} found, using default configuration", path.display())
            }
            ConfigSource::Invalid(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                warn!("Using default configuration");
            }
        }
    }
}
