//! 3D view configuration
//!
//! Loaded from a TOML file. Every field has a default, so an empty file is a
//! valid configuration.

use crate::error::{Result, View3dError};
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default window geometry of the 3D view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometryDefaults {
    /// Initial width in pixels
    pub initial_width: u32,
    /// Initial height in pixels
    pub initial_height: u32,
    /// Initial X position
    pub initial_x: i32,
    /// Initial Y position
    pub initial_y: i32,
    /// Whether the window starts docked
    pub initially_docked: bool,
}

impl Default for WindowGeometryDefaults {
    fn default() -> Self {
        Self {
            initial_width: 600,
            initial_height: 800,
            initial_x: 0,
            initial_y: 0,
            initially_docked: true,
        }
    }
}

/// Options handed to the visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct View3dOptions {
    /// Minimum scale denominator when zooming to a search result
    pub search_min_scale_denom: u32,
}

impl Default for View3dOptions {
    fn default() -> Self {
        Self {
            search_min_scale_denom: 1000,
        }
    }
}

/// 3D view configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct View3dConfig {
    /// Slot of the 2D/3D switch button, counted from the bottom (0 = bottom slot)
    pub button_position: u32,
    /// Default window geometry
    pub geometry: WindowGeometryDefaults,
    /// Visualization options
    pub options: View3dOptions,
    /// Logging
    pub log: LogConfig,
}

impl Default for View3dConfig {
    fn default() -> Self {
        Self {
            button_position: 6,
            geometry: WindowGeometryDefaults::default(),
            options: View3dOptions::default(),
            log: LogConfig::default(),
        }
    }
}

impl View3dConfig {
    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("View3D");
            p.push("config.toml");
            p
        })
    }

    /// Load the user configuration, falling back to defaults
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| match Self::load_from_path(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring config {:?}: {}", path, e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as TOML
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.geometry.initial_width == 0 || self.geometry.initial_height == 0 {
            return Err(View3dError::Config(format!(
                "window geometry must be non-empty, got {}x{}",
                self.geometry.initial_width, self.geometry.initial_height
            )));
        }
        Ok(())
    }
}
