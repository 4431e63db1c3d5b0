// src/config.rs

//! Defines the configuration structures for the painter.
//!
//! The configuration is a JSON document; every section and field is optional
//! and falls back to its default. The process-wide instance lives in
//! [`CONFIG`] and is read from the file named by the `PAINTER_CONFIG`
//! environment variable, if set.

use crate::geometry::Size;
use crate::lang::MoveBinding;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "PAINTER_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// --- Top-Level Configuration Structure ---

/// The complete configuration, grouped by the component that consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window creation and event forwarding.
    pub display: DisplayConfig,
    /// Presentation loop drawing parameters.
    pub presenter: PresenterConfig,
    /// Execution engine parameters.
    pub painter: PainterConfig,
    /// Command interpreter behavior.
    pub interpreter: InterpreterConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file named by `PAINTER_CONFIG`, or the defaults if the
    /// variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                match Self::load(&path) {
                    Ok(config) => {
                        info!("Loaded configuration from {}", path.display());
                        config
                    }
                    Err(e) => {
                        warn!("{}; using default configuration", e);
                        Self::default()
                    }
                }
            }
            None => Self::default(),
        }
    }
}

// --- Display Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in pixels.
    pub width_px: u32,
    /// Initial window height in pixels.
    pub height_px: u32,
    /// Log every OS event as it is forwarded to the presentation loop.
    pub debug: bool,
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width_px, self.height_px)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            title: "painter".to_string(),
            width_px: 800,
            height_px: 800,
            debug: false,
        }
    }
}

// --- Presenter Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresenterConfig {
    /// Width of the white border drawn around the placeholder, in pixels.
    pub border_px: u16,
    /// Size of the click-anchored cursor rectangle the placeholder is centered in.
    pub cursor_width_px: u16,
    pub cursor_height_px: u16,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        PresenterConfig {
            border_px: 10,
            cursor_width_px: 200,
            cursor_height_px: 200,
        }
    }
}

// --- Painter Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PainterConfig {
    /// Size of the texture operations draw into.
    pub texture_width_px: u32,
    pub texture_height_px: u32,
}

impl PainterConfig {
    pub fn texture_size(&self) -> Size {
        Size::new(self.texture_width_px, self.texture_height_px)
    }
}

impl Default for PainterConfig {
    fn default() -> Self {
        PainterConfig {
            texture_width_px: 800,
            texture_height_px: 800,
        }
    }
}

// --- Interpreter Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Which figures a `move` translates; see [`MoveBinding`].
    pub move_binding: MoveBinding,
}
